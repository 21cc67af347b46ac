use std::io::Read;

use tracing_subscriber::EnvFilter;

/// Env var holding an `EnvFilter` directive; takes precedence over `--debug`.
pub const LOG_FILTER_ENV: &str = "CTX_STATUSLINE_LOG";

pub fn read_stdin() -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    std::io::stdin().read_to_end(&mut buf)?;
    Ok(buf)
}

pub(crate) fn log_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "off" }))
}

/// Install the stderr log subscriber. Stdout is reserved for the status line.
pub fn init_logging(debug: bool) {
    // try_init: a subscriber may already be installed (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(debug))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
