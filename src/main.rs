//! grug's entry point.
//! Parses the command line, sets up logging and runs the render pipeline.

use grug::{
    cli::get_args,
    config::Config,
    error::{default_error_handler, Result},
    logger::init_logger,
    pipeline,
};

fn main() {
    let args = get_args();
    init_logger(args.verbose);

    let result: Result<()> = Config::try_from(args).and_then(|config| {
        pipeline::run(&config)?;
        Ok(())
    });
    if let Err(err) = result {
        default_error_handler(err);
    }
}
