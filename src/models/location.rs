//! Resolved place model

use serde::{Deserialize, Serialize};

/// A geocoded place: canonical name plus coordinates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Coordinate {
    /// Canonical place name as returned by the geocoder
    pub name: String,
    /// Country name, when the geocoder provides one
    pub country: Option<String>,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(name: String, country: Option<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name,
            country,
            latitude,
            longitude,
        }
    }

    /// Name shown to users, e.g. "Pune, India"
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
