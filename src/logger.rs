/// Initializes env_logger. `-v` enables the progress lines logged at info;
/// without it only warnings and errors are shown. Debug output is only
/// available through `RUST_LOG`, which takes precedence when set.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Info
        } else {
            log::LevelFilter::Warn
        })
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env()
        .init();
}
