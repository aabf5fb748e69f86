//! Command-line interface implementation for grug.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, Command, CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line arguments structure for grug.
#[derive(Parser, Debug)]
#[command(author, version, about = "grug: static template renderer", long_about = None)]
pub struct Args {
    /// Root directory of the templates to render
    #[arg(short = 'i', value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory the rendered files are written to, mirroring INPUT_DIR
    #[arg(short = 'o', value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Directory of shared templates that are available to every template
    /// but not rendered themselves [default: INPUT_DIR/_include]
    #[arg(long = "include", value_name = "INCLUDE_DIR")]
    pub include_dir: Option<PathBuf>,

    /// Print discovered files and every written output file
    #[arg(short, long)]
    pub verbose: bool,
}

/// Rewrites the single-dash `-include` spelling to `--include`.
///
/// clap would otherwise read `-include` as `-i nclude`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            let rewritten = match arg.to_str() {
                Some(s) if s == "-include" || s.starts_with("-include=") => {
                    Some(OsString::from(format!("-{s}")))
                }
                _ => None,
            };
            rewritten.unwrap_or(arg)
        })
        .collect()
}

/// The argument parser with the short usage layout printed when a
/// required argument is missing.
pub fn usage() -> Command {
    Args::command().help_template(
        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
    )
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 and the usage text if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                eprintln!("{}", e.render());
                if let Err(err) = usage().print_help() {
                    eprintln!("Failed to print usage: {err}");
                }
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
