//! Open-Meteo geocoding and forecast client
//!
//! Both APIs are keyless. Each call is a single round trip with its own
//! timeout; failures are reported as upstream errors and never retried.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::{ForecastFetcher, Geocoder};
use crate::config::FloodWatchConfig;
use crate::models::{Coordinate, HourlySeries};
use crate::{FloodWatchError, Result};

const GEOCODING_PROVIDER: &str = "Geocoding";
const FORECAST_PROVIDER: &str = "Forecast";

const HOURLY_VARIABLES: &str = "temperature_2m,precipitation,relativehumidity_2m,windspeed_10m";

/// HTTP client for the Open-Meteo geocoding and forecast APIs
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    geocoding_base_url: String,
    geocoding_timeout: Duration,
    forecast_base_url: String,
    forecast_timeout: Duration,
}

impl OpenMeteoClient {
    pub fn new(config: &FloodWatchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("FloodWatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FloodWatchError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            geocoding_base_url: config.geocoding.base_url.trim_end_matches('/').to_string(),
            geocoding_timeout: Duration::from_secs(config.geocoding.timeout_seconds.into()),
            forecast_base_url: config.forecast.base_url.trim_end_matches('/').to_string(),
            forecast_timeout: Duration::from_secs(config.forecast.timeout_seconds.into()),
        })
    }

    fn geocoding_url(&self, name: &str) -> String {
        format!(
            "{}/search?name={}&count=1&language=en&format=json",
            self.geocoding_base_url,
            urlencoding::encode(name)
        )
    }

    fn forecast_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&hourly={}&timezone=auto&wind_speed_unit=ms",
            self.forecast_base_url, latitude, longitude, HOURLY_VARIABLES
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        provider: &'static str,
        url: &str,
        timeout: Duration,
    ) -> Result<T> {
        debug!("{} API request URL: {}", provider, url);
        let start_time = Instant::now();

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!("{} API timed out after {}s", provider, timeout.as_secs());
                    FloodWatchError::upstream(
                        provider,
                        format!("no response within {}s", timeout.as_secs()),
                    )
                } else {
                    warn!("{} API request failed: {}", provider, e);
                    FloodWatchError::upstream(provider, format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} API responded with HTTP {}", provider, status);
            return Err(FloodWatchError::upstream(
                provider,
                format!("HTTP {}", status.as_u16()),
            ));
        }

        let body = response.json::<T>().await.map_err(|e| {
            warn!("Failed to parse {} API response: {}", provider, e);
            FloodWatchError::upstream(provider, format!("invalid response body: {e}"))
        })?;

        let elapsed = start_time.elapsed();
        debug!(
            "{} API answered in {:.3}s",
            provider,
            elapsed.as_secs_f64()
        );
        if elapsed > timeout / 2 {
            warn!("Slow {} API response: {:.3}s", provider, elapsed.as_secs_f64());
        }

        Ok(body)
    }
}

#[async_trait]
impl Geocoder for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn search(&self, name: &str) -> Result<Option<Coordinate>> {
        let url = self.geocoding_url(name);
        let response: GeocodingResponse = self
            .get_json(GEOCODING_PROVIDER, &url, self.geocoding_timeout)
            .await?;

        let best = response
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(Coordinate::from);

        match &best {
            Some(coordinate) => info!(
                "Geocoded '{}' to {} ({})",
                name,
                coordinate.display_name(),
                coordinate.format_coordinates()
            ),
            None => warn!("No geocoding results for '{}'", name),
        }
        Ok(best)
    }
}

#[async_trait]
impl ForecastFetcher for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<HourlySeries> {
        let url = self.forecast_url(latitude, longitude);
        let response: ForecastResponse = self
            .get_json(FORECAST_PROVIDER, &url, self.forecast_timeout)
            .await?;

        let series = response.hourly.map(HourlySeries::from).unwrap_or_default();
        info!("Retrieved {} hourly data points", series.len());
        Ok(series)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

impl From<GeocodingResult> for Coordinate {
    fn from(result: GeocodingResult) -> Self {
        Coordinate::new(result.name, result.country, result.latitude, result.longitude)
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: Option<HourlyData>,
}

/// Hourly arrays; any of them may be missing or contain nulls
#[derive(Debug, Deserialize)]
struct HourlyData {
    #[serde(default)]
    time: Vec<String>,
    #[serde(rename = "temperature_2m", default)]
    temperature: Vec<Option<f64>>,
    #[serde(default)]
    precipitation: Vec<Option<f64>>,
    #[serde(
        rename = "relativehumidity_2m",
        alias = "relative_humidity_2m",
        default
    )]
    humidity: Vec<Option<f64>>,
    #[serde(rename = "windspeed_10m", alias = "wind_speed_10m", default)]
    wind_speed: Vec<Option<f64>>,
}

fn fill_gaps(values: Vec<Option<f64>>, variable: &str) -> Vec<f64> {
    let gaps = values.iter().filter(|v| v.is_none()).count();
    if gaps > 0 {
        debug!("{} null {} samples replaced with 0", gaps, variable);
    }
    values.into_iter().map(|v| v.unwrap_or(0.0)).collect()
}

impl From<HourlyData> for HourlySeries {
    fn from(hourly: HourlyData) -> Self {
        HourlySeries {
            times: hourly.time,
            temperature: fill_gaps(hourly.temperature, "temperature"),
            precipitation: fill_gaps(hourly.precipitation, "precipitation"),
            humidity: fill_gaps(hourly.humidity, "humidity"),
            wind_speed: fill_gaps(hourly.wind_speed, "wind speed"),
        }
    }
}
