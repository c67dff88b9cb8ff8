//! Location Resolution Module
//!
//! Turns a free-text place name into a [`Coordinate`] using whichever
//! [`Geocoder`] the service was built with.

use std::sync::Arc;

use tracing::debug;

use crate::models::Coordinate;
use crate::weather::Geocoder;
use crate::{FloodWatchError, Result};

/// Service for resolving place names
#[derive(Clone)]
pub struct LocationResolver {
    geocoder: Arc<dyn Geocoder>,
}

impl LocationResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    /// Resolve a place name to its best geocoding match.
    ///
    /// Zero matches is [`FloodWatchError::NotFound`]; provider failures pass
    /// through unchanged.
    pub async fn resolve(&self, city: &str) -> Result<Coordinate> {
        debug!("Geocoding location name: {}", city);

        let coordinate = self
            .geocoder
            .search(city)
            .await?
            .ok_or_else(|| FloodWatchError::not_found(city))?;

        debug!(
            "Resolved location: {} at ({}, {})",
            coordinate.name, coordinate.latitude, coordinate.longitude
        );
        Ok(coordinate)
    }
}
