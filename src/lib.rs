//! `FloodWatch` - flood, heat and storm risk snapshots for field teams
//!
//! This library resolves a city, fetches its hourly forecast, classifies
//! risk from rolling rainfall and 24 hour maxima, and composes advisories
//! in English, Hindi and Marathi. The `web` module serves it over HTTP.

pub mod advisory;
pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod forecast_service;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod risk;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use advisory::{AdvisoryComposer, ClauseTable};
pub use config::FloodWatchConfig;
pub use error::FloodWatchError;
pub use forecast_service::ForecastService;
pub use location_resolver::LocationResolver;
pub use models::{
    AdvisoryBundle, Coordinate, ForecastPayload, HourlySeries, Language, RiskLevel, RiskSummary,
};
pub use risk::{RiskAggregator, RiskThresholds};
pub use weather::{ForecastFetcher, Geocoder, OpenMeteoClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, FloodWatchError>;
