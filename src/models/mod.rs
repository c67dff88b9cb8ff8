//! Data models for the FloodWatch service
//!
//! - Location: resolved place name and coordinates
//! - Series: hourly weather arrays from the forecast provider
//! - Risk: ordered risk levels and the per-request summary
//! - Payload: advisory bundle and the response sent to clients

pub mod location;
pub mod payload;
pub mod risk;
pub mod series;

pub use location::Coordinate;
pub use payload::{AdvisoryBundle, ForecastPayload, Language};
pub use risk::{RiskDimension, RiskLevel, RiskSummary};
pub use series::HourlySeries;
