//! Hourly weather time series

use serde::{Deserialize, Serialize};

/// Parallel hourly sequences, oldest first.
///
/// Index `i` of every sequence refers to the same instant. The provider
/// contract guarantees this; [`HourlySeries::is_aligned`] lets consumers check.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct HourlySeries {
    /// Local timestamps exactly as delivered upstream (e.g. `2024-07-01T13:00`)
    pub times: Vec<String>,
    /// Air temperature at 2 m in °C
    pub temperature: Vec<f64>,
    /// Precipitation in mm
    #[serde(rename = "precip")]
    pub precipitation: Vec<f64>,
    /// Relative humidity at 2 m in %
    pub humidity: Vec<f64>,
    /// Wind speed at 10 m in m/s
    #[serde(rename = "wind")]
    pub wind_speed: Vec<f64>,
}

impl HourlySeries {
    /// Number of hours covered, i.e. the longest of the sequences
    #[must_use]
    pub fn len(&self) -> usize {
        self.lengths().into_iter().max().unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when all five sequences have the same length
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        let lengths = self.lengths();
        lengths.iter().all(|&len| len == lengths[0])
    }

    fn lengths(&self) -> [usize; 5] {
        [
            self.times.len(),
            self.temperature.len(),
            self.precipitation.len(),
            self.humidity.len(),
            self.wind_speed.len(),
        ]
    }
}

/// The trailing `hours` entries of `values`, or all of them when shorter.
#[must_use]
pub fn tail(values: &[f64], hours: usize) -> &[f64] {
    &values[values.len().saturating_sub(hours)..]
}
