use std::path::PathBuf;

use anyhow::Result;
use floodwatch::{FloodWatchConfig, logging, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => FloodWatchConfig::load_from_path(Some(PathBuf::from(path)))?,
        None => FloodWatchConfig::load()?,
    };

    logging::init(&config.logging)?;
    tracing::info!(
        "FloodWatch {} starting (geocoding: {}, forecast: {})",
        floodwatch::VERSION,
        config.geocoding.base_url,
        config.forecast.base_url
    );

    web::run(config).await
}
