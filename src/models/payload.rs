//! The unit exchanged across the HTTP boundary

use serde::{Deserialize, Serialize};

use super::{HourlySeries, RiskSummary};

/// Advisory display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Hindi,
    Marathi,
}

/// Advisory text in each supported language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryBundle {
    pub advisory_en: String,
    pub advisory_hi: String,
    pub advisory_mr: String,
}

impl AdvisoryBundle {
    #[must_use]
    pub fn for_language(&self, language: Language) -> &str {
        match language {
            Language::English => &self.advisory_en,
            Language::Hindi => &self.advisory_hi,
            Language::Marathi => &self.advisory_mr,
        }
    }
}

/// Forecast, risk and advisories for one resolved city.
///
/// Serializes flat: hourly arrays and advisory strings sit next to the
/// location fields, the way the dashboard reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPayload {
    /// Display name, e.g. "Pune, India"
    pub location: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(flatten)]
    pub series: HourlySeries,
    /// Rainfall over the last 24 hours (mm)
    pub rolling_24: f64,
    /// Rainfall over the last 72 hours (mm)
    pub rolling_72: f64,
    /// Population standard deviation of hourly rainfall
    pub precip_std: f64,
    pub risk: RiskSummary,
    #[serde(flatten)]
    pub advisory: AdvisoryBundle,
}
