//! Run configuration resolved from the command line.

use log::debug;
use std::path::PathBuf;

use crate::cli::Args;
use crate::error::{Error, Result};
use crate::paths::clean;

/// Name of the include directory looked up under the input directory when
/// `--include` is not given.
pub const DEFAULT_INCLUDE_DIR: &str = "_include";

/// Resolved settings for one render run.
///
/// All directories are lexically cleaned so that they compare segment by
/// segment with the paths produced while walking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub include_dir: PathBuf,
}

impl Config {
    /// Builds a configuration, defaulting the include directory to
    /// `<input_dir>/_include`.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the input or output directory is empty
    pub fn new<I, O>(input_dir: I, output_dir: O, include_dir: Option<PathBuf>) -> Result<Self>
    where
        I: Into<PathBuf>,
        O: Into<PathBuf>,
    {
        let input_dir = input_dir.into();
        let output_dir = output_dir.into();
        if input_dir.as_os_str().is_empty() {
            return Err(Error::ConfigError(
                "Must specify -i\nusage: -i [input dir]".to_string(),
            ));
        }
        if output_dir.as_os_str().is_empty() {
            return Err(Error::ConfigError(
                "Must specify -o\nusage: -o [output dir]".to_string(),
            ));
        }

        let input_dir = clean(input_dir);
        let include_dir = match include_dir {
            Some(dir) if !dir.as_os_str().is_empty() => clean(dir),
            _ => input_dir.join(DEFAULT_INCLUDE_DIR),
        };

        let config = Self {
            output_dir: clean(output_dir),
            include_dir,
            input_dir,
        };
        debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }
}

impl TryFrom<Args> for Config {
    type Error = Error;

    fn try_from(args: Args) -> Result<Self> {
        Config::new(args.input_dir, args.output_dir, args.include_dir)
    }
}
