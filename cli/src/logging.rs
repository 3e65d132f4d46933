use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count. Defaults to `info` so progress lines
/// are visible without flags.
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG`, when set, wins over `-v`.
pub fn init(verbose: u8) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("installing log subscriber failed: {err}"))
}
