//! The render run: discovery, template set composition and the render loop.

use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::discover::discover;
use crate::error::Result;
use crate::helpers::Helpers;
use crate::paths::prefix_match;
use crate::renderer::{render, RenderJob};
use crate::template_set::TemplateSetBuilder;

/// Renders every file under `config.input_dir` into `config.output_dir`.
///
/// Files under the include directory are available to other templates
/// but are not rendered. A missing include directory is only a warning.
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - The written output files, in render order
///
/// # Flow
/// 1. Discovers input files, skipping the include directory and an output
///    directory nested inside the input directory
/// 2. Discovers include files
/// 3. Parses both sets into one template set
/// 4. Renders each input file to its mirrored output path
///
/// The run stops at the first error. Files written before the error stay
/// on disk.
pub fn run(config: &Config) -> Result<Vec<PathBuf>> {
    let mut input_ignores = vec![config.include_dir.as_path()];
    if config.output_dir != config.input_dir
        && prefix_match(&config.output_dir, &config.input_dir)
    {
        input_ignores.push(config.output_dir.as_path());
    }
    let input_files = discover(&config.input_dir, &input_ignores)?;
    info!("input files: {:?}", input_files);

    let include_files = if config.include_dir.exists() {
        discover::<&Path>(&config.include_dir, &[])?
    } else {
        warn!(
            "Include directory {} does not exist, continuing without includes",
            config.include_dir.display()
        );
        Vec::new()
    };
    info!("include files: {:?}", include_files);

    let mut builder = TemplateSetBuilder::new(Helpers::builtin());
    builder
        .add_root(&config.input_dir, &input_files)?
        .add_root(&config.include_dir, &include_files)?;
    let templates = builder.build();

    let mut written = Vec::with_capacity(input_files.len());
    for source in &input_files {
        let job = RenderJob::new(&config.input_dir, &config.output_dir, source)?;
        render(&templates, &job)?;
        info!("{} written successfully", job.output_path.display());
        written.push(job.output_path);
    }

    Ok(written)
}
