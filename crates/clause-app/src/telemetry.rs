//! Tracing setup for the dashboard binary.

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "clause_app=info,clause_sdk=info,clause_session=info";

/// Install the global subscriber. Logs go to stderr; `RUST_LOG` overrides the filter.
pub fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing: {}", e))
}
