//! Rolling rainfall statistics and threshold-based risk classification
//!
//! Everything here is pure arithmetic over an already-fetched
//! [`HourlySeries`]. Short or empty histories never fail: rolling sums fall
//! back to whatever is available and empty windows classify as `Low`.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::series::tail;
use crate::models::{HourlySeries, RiskDimension, RiskLevel, RiskSummary};
use crate::{FloodWatchError, Result};

/// Rainfall window driving the flood classification
pub const FLOOD_WINDOW_HOURS: usize = 24;
/// Longer rainfall window reported alongside
pub const EXTENDED_WINDOW_HOURS: usize = 72;
/// Window for the heat and storm maxima
pub const RISK_WINDOW_HOURS: usize = 24;

/// Reported max temperature when there is no temperature data
pub const MISSING_TEMPERATURE: f64 = -999.0;

/// Inclusive lower bounds for `Medium` and `High`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelThresholds {
    pub medium: f64,
    pub high: f64,
}

impl LevelThresholds {
    #[must_use]
    pub const fn new(medium: f64, high: f64) -> Self {
        Self { medium, high }
    }

    /// Top-down, first match wins
    #[must_use]
    pub fn classify(&self, value: f64) -> RiskLevel {
        if value >= self.high {
            RiskLevel::High
        } else if value >= self.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    fn validate(&self, dimension: RiskDimension) -> Result<()> {
        if !self.medium.is_finite() || !self.high.is_finite() {
            return Err(FloodWatchError::config(format!(
                "{dimension:?} thresholds must be finite numbers"
            )));
        }
        if self.medium > self.high {
            return Err(FloodWatchError::config(format!(
                "{dimension:?} medium threshold ({}) cannot exceed high threshold ({})",
                self.medium, self.high
            )));
        }
        Ok(())
    }
}

/// Threshold table for every risk dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// 24 h rainfall in mm
    pub flood: LevelThresholds,
    /// Max temperature in °C
    pub heat: LevelThresholds,
    /// Max wind speed in m/s
    pub storm: LevelThresholds,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            // medium is 60% of the 50 mm flood line
            flood: LevelThresholds::new(30.0, 50.0),
            heat: LevelThresholds::new(35.0, 40.0),
            storm: LevelThresholds::new(8.0, 15.0),
        }
    }
}

impl RiskThresholds {
    #[must_use]
    pub fn for_dimension(&self, dimension: RiskDimension) -> &LevelThresholds {
        match dimension {
            RiskDimension::Flood => &self.flood,
            RiskDimension::Heat => &self.heat,
            RiskDimension::Storm => &self.storm,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for dimension in RiskDimension::ALL {
            self.for_dimension(dimension).validate(dimension)?;
        }
        Ok(())
    }
}

/// Output of [`RiskAggregator::aggregate`]
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAggregate {
    pub rolling_24: f64,
    pub rolling_72: f64,
    /// Rounded to 2 decimals
    pub precip_std: f64,
    pub risk: RiskSummary,
}

/// Classifies hourly series against a threshold table
#[derive(Debug, Clone, Default)]
pub struct RiskAggregator {
    thresholds: RiskThresholds,
}

impl RiskAggregator {
    #[must_use]
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    /// Rolling sums, rainfall variability and risk levels for a series
    #[must_use]
    pub fn aggregate(&self, series: &HourlySeries) -> RiskAggregate {
        if !series.is_aligned() {
            warn!(
                times = series.times.len(),
                temperature = series.temperature.len(),
                precipitation = series.precipitation.len(),
                humidity = series.humidity.len(),
                wind = series.wind_speed.len(),
                "Hourly arrays have different lengths, using each array's own tail"
            );
        }
        if series.precipitation.len() < EXTENDED_WINDOW_HOURS {
            debug!(
                hours = series.precipitation.len(),
                "Short rainfall history, rolling sums cover what is available"
            );
        }

        let rolling_24 = rolling_sum(&series.precipitation, FLOOD_WINDOW_HOURS);
        let rolling_72 = rolling_sum(&series.precipitation, EXTENDED_WINDOW_HOURS);
        let precip_std = round_to(population_std(&series.precipitation), 2);

        let temps_24 = tail(&series.temperature, RISK_WINDOW_HOURS);
        let winds_24 = tail(&series.wind_speed, RISK_WINDOW_HOURS);
        let risk = self.summarize(rolling_24, temps_24, winds_24);

        RiskAggregate {
            rolling_24,
            rolling_72,
            precip_std,
            risk,
        }
    }

    /// Classify flood from the 24 h sum, heat and storm from window maxima
    #[must_use]
    pub fn summarize(&self, rolling_24: f64, temps_24: &[f64], winds_24: &[f64]) -> RiskSummary {
        let max_temp = max_of(temps_24).unwrap_or(MISSING_TEMPERATURE);
        let max_wind = max_of(winds_24).unwrap_or(0.0);

        RiskSummary {
            flood: self.thresholds.flood.classify(rolling_24),
            heat: self.thresholds.heat.classify(max_temp),
            storm: self.thresholds.storm.classify(max_wind),
            max_temp: round_to(max_temp, 1),
            max_wind: round_to(max_wind, 1),
        }
    }
}

/// Sum of the last `hours` values rounded to 2 decimals.
///
/// Shorter histories sum everything available; an empty slice is `0.0`.
#[must_use]
pub fn rolling_sum(values: &[f64], hours: usize) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    round_to(tail(values, hours).iter().sum(), 2)
}

/// Standard deviation over the whole slice (no Bessel correction)
#[must_use]
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

fn max_of(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
