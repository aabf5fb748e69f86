//! Recursive template discovery.

use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::paths::any_prefix_match;

/// Walks `root` depth-first and returns every file under it.
///
/// Entries that prefix-match one of `ignores` are skipped. Ignored
/// directories are pruned before they are read, so an ignored directory
/// that does not exist or cannot be listed does not fail the walk.
///
/// # Ordering
/// Parents come before their children and siblings are visited in
/// file-name order.
///
/// # Errors
/// * `Error::DiscoveryError` naming the offending path if `root` does not
///   exist, a directory cannot be read, or a symlink is broken or loops
pub fn discover<P: AsRef<Path>>(root: &Path, ignores: &[P]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let ignored = any_prefix_match(entry.path(), ignores);
            if ignored {
                debug!("Skipping ignored path {}", entry.path().display());
            }
            !ignored
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // Errors bypass filter_entry, e.g. a broken symlink that is ignored.
            Err(err) if err.path().is_some_and(|p| any_prefix_match(p, ignores)) => {
                debug!("Skipping unreadable ignored path: {}", err);
                continue;
            }
            Err(source) => {
                return Err(Error::DiscoveryError {
                    path: source.path().unwrap_or(root).to_path_buf(),
                    source,
                })
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }
        if any_prefix_match(entry.path(), ignores) {
            continue;
        }
        files.push(entry.into_path());
    }

    Ok(files)
}
