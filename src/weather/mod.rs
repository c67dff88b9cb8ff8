//! Upstream weather providers
//!
//! Geocoding and hourly forecasts come from external services. The rest of
//! the crate only sees these two traits, so tests and alternative providers
//! can stand in for Open-Meteo.

use async_trait::async_trait;

use crate::Result;
use crate::models::{Coordinate, HourlySeries};

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Maps a place name to its best match
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` when the provider knows no place by that name
    async fn search(&self, name: &str) -> Result<Option<Coordinate>>;
}

/// Retrieves hourly temperature, precipitation, humidity and wind
#[async_trait]
pub trait ForecastFetcher: Send + Sync {
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<HourlySeries>;
}
