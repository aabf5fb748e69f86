//! Segment-wise path helpers.
//! All comparisons work on `std::path::Component`s, never on raw strings,
//! so `root/ab` is not considered to be under `root/a`.

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Components of `path` with `.` segments dropped.
fn segments(path: &Path) -> impl Iterator<Item = Component<'_>> {
    path.components().filter(|c| !matches!(c, Component::CurDir))
}

/// Returns true if `candidate` is an ancestor of `base` or equal to it.
///
/// Every segment of `candidate` must equal the segment of `base` at the
/// same index, and `candidate` must not be longer than `base`.
///
/// An empty `candidate` is a single empty segment: it only matches an
/// empty `base` and never a normal path.
pub fn prefix_match<B: AsRef<Path>, C: AsRef<Path>>(base: B, candidate: C) -> bool {
    let base = base.as_ref();
    let candidate = candidate.as_ref();
    if candidate.as_os_str().is_empty() {
        return base.as_os_str().is_empty();
    }

    let mut base_segments = segments(base);
    segments(candidate).all(|segment| base_segments.next() == Some(segment))
}

/// Returns true if any of `candidates` prefix-matches `base`.
pub fn any_prefix_match<B, C>(base: B, candidates: &[C]) -> bool
where
    B: AsRef<Path>,
    C: AsRef<Path>,
{
    let base = base.as_ref();
    candidates.iter().any(|candidate| prefix_match(base, candidate))
}

/// Lexically normalises a path.
///
/// Drops `.` segments, resolves `..` against a preceding normal segment,
/// and collapses repeated separators. `..` directly under the root is
/// dropped, a leading `..` on a relative path is kept. An empty result
/// becomes `.`.
pub fn clean<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            _ => out.push(component),
        }
    }

    if out.is_empty() {
        PathBuf::from(".")
    } else {
        out.iter().collect()
    }
}

/// Moves `path` from under `from` to the same relative position under `to`.
///
/// Returns `None` when `path` is not under `from`.
pub fn rebase<P, F, T>(path: P, from: F, to: T) -> Option<PathBuf>
where
    P: AsRef<Path>,
    F: AsRef<Path>,
    T: AsRef<Path>,
{
    let from = from.as_ref();
    let path = path.as_ref();
    if !prefix_match(path, from) {
        return None;
    }

    let skip = segments(from).count();
    let relative: PathBuf = segments(path).skip(skip).collect();
    if relative.as_os_str().is_empty() {
        return Some(to.as_ref().to_path_buf());
    }
    Some(to.as_ref().join(relative))
}

/// Template name of `path`: its segments relative to `root`, joined by `/`.
///
/// When `path` is `root` itself (a single file given as a root) the name
/// is the file name.
///
/// # Errors
/// * `Error::PathOutsideRootError` if `path` is not under `root`
/// * `Error::InvalidPathError` if a segment is not valid UTF-8
pub fn logical_name(root: &Path, path: &Path) -> Result<String> {
    let relative = rebase(path, root, "").ok_or_else(|| Error::PathOutsideRootError {
        path: path.to_path_buf(),
        root: root.to_path_buf(),
    })?;
    let relative = if relative.as_os_str().is_empty() {
        path.file_name().map(PathBuf::from).unwrap_or_default()
    } else {
        relative
    };

    let mut names = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => names.push(
                segment
                    .to_str()
                    .ok_or_else(|| Error::InvalidPathError(path.to_path_buf()))?,
            ),
            _ => {
                return Err(Error::PathOutsideRootError {
                    path: path.to_path_buf(),
                    root: root.to_path_buf(),
                })
            }
        }
    }
    if names.is_empty() {
        return Err(Error::InvalidPathError(path.to_path_buf()));
    }

    Ok(names.join("/"))
}

/// Last segment of a logical template name.
pub fn short_name(logical_name: &str) -> &str {
    logical_name.rsplit('/').next().unwrap_or(logical_name)
}
