//! Rendering of a single template to its mirrored output file.

use log::debug;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::paths::{logical_name, rebase};
use crate::template_set::TemplateSet;

/// One input file and the output file it renders to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    /// The discovered input file
    pub source_path: PathBuf,
    /// Where the rendered bytes go
    pub output_path: PathBuf,
    /// Logical name of the template to execute
    pub template_name: String,
}

impl RenderJob {
    /// Builds the job for `source`, mirroring its position under
    /// `input_root` beneath `output_root`.
    ///
    /// # Errors
    /// * `Error::PathOutsideRootError` if `source` is not under `input_root`
    /// * `Error::InvalidPathError` if `source` is not valid UTF-8
    pub fn new<P: AsRef<Path>>(input_root: &Path, output_root: &Path, source: P) -> Result<Self> {
        let source = source.as_ref();
        let template_name = logical_name(input_root, source)?;
        let output_path =
            rebase(source, input_root, output_root).ok_or_else(|| Error::PathOutsideRootError {
                path: source.to_path_buf(),
                root: input_root.to_path_buf(),
            })?;

        Ok(Self {
            source_path: source.to_path_buf(),
            output_path,
            template_name,
        })
    }
}

/// Executes `job` and writes the result to `job.output_path`.
///
/// Missing parent directories are created and an existing output file is
/// truncated. The file handle is released on every return path.
///
/// # Errors
/// * `Error::RenderError` if the template is not in `set` or fails to execute
/// * `Error::WriteError` if the output cannot be created or written
pub fn render(set: &TemplateSet, job: &RenderJob) -> Result<()> {
    let Some(template_path) = set.path(&job.template_name) else {
        return Err(Error::RenderError {
            path: job.source_path.clone(),
            source: minijinja::Error::new(
                minijinja::ErrorKind::TemplateNotFound,
                format!("template '{}' is not in the template set", job.template_name),
            ),
        });
    };

    if let Some(parent) = job.output_path.parent() {
        fs::create_dir_all(parent).map_err(|source| Error::WriteError {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    debug!(
        "Rendering '{}' ({}) to {}",
        job.template_name,
        template_path.display(),
        job.output_path.display()
    );
    let file = File::create(&job.output_path).map_err(|source| Error::WriteError {
        path: job.output_path.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    set.render_to_write(&job.template_name, &mut writer)
        .map_err(|source| Error::RenderError {
            path: job.source_path.clone(),
            source,
        })?;
    writer.flush().map_err(|source| Error::WriteError {
        path: job.output_path.clone(),
        source,
    })
}
