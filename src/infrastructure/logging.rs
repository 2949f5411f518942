/// Logging setup for strictc.
/// Logs go to stderr next to the diagnostics, so the default filter keeps normal runs quiet.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`info`, `strictc=debug`, ...).
pub const LOG_ENV: &str = "STRICTC_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the global tracing subscriber. Fails if one is already installed.
pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_only_once() {
        // Another test may have installed a subscriber first; a second install must fail.
        let _ = init_logging();
        assert!(init_logging().is_err());
    }
}
