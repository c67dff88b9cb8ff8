//! Risk levels and per-request risk summary

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered risk level, `Low < Medium < High`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        f.write_str(label)
    }
}

/// The hazards classified for every request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskDimension {
    Flood,
    Heat,
    Storm,
}

impl RiskDimension {
    /// Order in which advisories are composed
    pub const ALL: [RiskDimension; 3] = [RiskDimension::Flood, RiskDimension::Heat, RiskDimension::Storm];
}

/// Flood/heat/storm classification plus the scalars it was derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub flood: RiskLevel,
    pub heat: RiskLevel,
    pub storm: RiskLevel,
    /// Highest temperature in the 24 h window (°C), -999 when the window is empty
    pub max_temp: f64,
    /// Highest wind speed in the 24 h window (m/s), 0 when the window is empty
    pub max_wind: f64,
}

impl RiskSummary {
    #[must_use]
    pub fn level(&self, dimension: RiskDimension) -> RiskLevel {
        match dimension {
            RiskDimension::Flood => self.flood,
            RiskDimension::Heat => self.heat,
            RiskDimension::Storm => self.storm,
        }
    }
}

impl fmt::Display for RiskSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Flood: {}  |  Heat: {}  |  Storm: {}",
            self.flood, self.heat, self.storm
        )
    }
}
