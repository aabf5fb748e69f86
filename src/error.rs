//! Error handling for grug.
//! Defines the error type and result alias used throughout the pipeline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort a render run.
///
/// Every variant is fatal. The single recoverable condition of a run
/// (a missing include directory) never becomes an `Error`; the pipeline
/// logs it as a warning instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or missing command-line configuration
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// The directory walk failed at `path`
    #[error("Failed to discover files under '{}': {source}.", path.display())]
    DiscoveryError {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A template source could not be read
    #[error("Failed to read template '{}': {source}.", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A template body is not valid template syntax
    #[error("Failed to parse template '{}': {source}.", path.display())]
    TemplateParseError {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    /// Two files resolved to the same logical template name
    #[error("Duplicate template name '{name}' for '{}'.", path.display())]
    DuplicateTemplateError { name: String, path: PathBuf },

    /// A template path cannot be used as a template name
    #[error("Path '{}' is not valid UTF-8.", .0.display())]
    InvalidPathError(PathBuf),

    /// A path that must live under `root` does not
    #[error("Path '{}' is not under '{}'.", path.display(), root.display())]
    PathOutsideRootError { path: PathBuf, root: PathBuf },

    /// Template lookup or execution failed
    #[error("Failed to render '{}': {source}.", path.display())]
    RenderError {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    /// An output directory or file could not be created or written
    #[error("Failed to write '{}': {source}.", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Convenience type alias for Results with `Error` as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{err}");
    std::process::exit(1);
}
