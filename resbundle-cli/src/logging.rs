use tracing_subscriber::EnvFilter;

/// Filter for the log output: `-v`/`-q` pick a level, otherwise `RUST_LOG`, otherwise `info`.
pub fn log_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Installs the global subscriber. Logs go to stderr so stdout carries only the run summary.
pub fn init_logging(verbose: bool, quiet: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, quiet))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
