//! Logger setup for the command-line tool

use anyhow::Result;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Filter used when RUST_LOG is unset
const DEFAULT_FILTER: &str = "prng_testbench=info,prng_testbench_core=info";

/// Log to stderr so stdout stays clean for sample and grid output
pub fn init_logger() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    Ok(())
}
