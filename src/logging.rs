//! Tracing subscriber setup

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!("floodwatch={0},tower_http={0}", config.level))?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.pretty().try_init()
    };

    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))
}
