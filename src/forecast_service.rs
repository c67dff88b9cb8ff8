//! City forecast orchestration
//!
//! Resolves a place name, fetches its hourly forecast, classifies risk and
//! composes advisories. Each call runs its own resolve-then-fetch chain; no
//! state is shared between calls, so concurrent requests need no coordination.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::advisory::AdvisoryComposer;
use crate::config::FloodWatchConfig;
use crate::location_resolver::LocationResolver;
use crate::models::ForecastPayload;
use crate::risk::RiskAggregator;
use crate::weather::{ForecastFetcher, Geocoder, OpenMeteoClient};
use crate::{FloodWatchError, Result};

/// Produces [`ForecastPayload`]s for city names
#[derive(Clone)]
pub struct ForecastService {
    resolver: LocationResolver,
    fetcher: Arc<dyn ForecastFetcher>,
    aggregator: RiskAggregator,
    composer: AdvisoryComposer,
}

impl ForecastService {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        fetcher: Arc<dyn ForecastFetcher>,
        aggregator: RiskAggregator,
        composer: AdvisoryComposer,
    ) -> Self {
        Self {
            resolver: LocationResolver::new(geocoder),
            fetcher,
            aggregator,
            composer,
        }
    }

    /// Open-Meteo backed service using the configured thresholds
    pub fn from_config(config: &FloodWatchConfig) -> Result<Self> {
        let client = Arc::new(OpenMeteoClient::new(config)?);
        Ok(Self::new(
            client.clone(),
            client,
            RiskAggregator::new(config.risk),
            AdvisoryComposer::default(),
        ))
    }

    /// Forecast, rolling rainfall, risk and advisories for a city.
    ///
    /// Errors from geocoding or the forecast provider are returned as-is.
    #[instrument(skip(self))]
    pub async fn get_forecast(&self, city: &str) -> Result<ForecastPayload> {
        let city = city.trim();
        if city.is_empty() {
            return Err(FloodWatchError::invalid_input("city param required"));
        }

        let location = self.resolver.resolve(city).await?;
        let series = self
            .fetcher
            .fetch(location.latitude, location.longitude)
            .await?;

        let aggregate = self.aggregator.aggregate(&series);
        let advisory = self.composer.compose(&aggregate.risk);

        info!(
            "Forecast for {}: {} hours, 24h rain {} mm, {}",
            location.display_name(),
            series.len(),
            aggregate.rolling_24,
            aggregate.risk
        );

        Ok(ForecastPayload {
            location: location.display_name(),
            lat: location.latitude,
            lon: location.longitude,
            series,
            rolling_24: aggregate.rolling_24,
            rolling_72: aggregate.rolling_72,
            precip_std: aggregate.precip_std,
            risk: aggregate.risk,
            advisory,
        })
    }
}
