//! Resolves a [`LocationQuery`] into a canonical [`Location`].

use super::bounded;
use crate::api::GeocodingProvider;
use crate::error::{AppError, Result};
use crate::models::{Location, LocationQuery, FALLBACK_LOCATION_NAME};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Resolves names and coordinates through a geocoding provider.
///
/// Name lookups try the configured region first and retry once without it.
pub struct LocationResolver {
    geocoder: Arc<dyn GeocodingProvider>,
    region_hint: Option<String>,
    timeout: Duration,
}

impl LocationResolver {
    pub fn new(geocoder: Arc<dyn GeocodingProvider>, region_hint: Option<String>, timeout: Duration) -> Self {
        Self {
            geocoder,
            region_hint: region_hint.filter(|r| !r.trim().is_empty()),
            timeout,
        }
    }

    /// Resolves the query. Fails with `NotFound` when no candidate exists.
    pub async fn resolve(&self, query: &LocationQuery) -> Result<Location> {
        query.validate()?;
        match query {
            LocationQuery::ByName(name) => self.resolve_name(name.trim()).await,
            LocationQuery::ByCoords(c) => self.resolve_coords(c.latitude, c.longitude).await,
        }
    }

    async fn resolve_name(&self, name: &str) -> Result<Location> {
        if let Some(region) = self.region_hint.as_deref() {
            let scoped = bounded(
                "geocoding",
                self.timeout,
                self.geocoder.search(name, Some(region)),
            )
            .await?;
            if let Some(location) = scoped.into_iter().next() {
                info!("Resolved '{}' in region {} to {:?}", name, region, location);
                return Ok(location);
            }
            debug!("No results for '{}' in region {}, retrying unscoped", name, region);
        }

        let unscoped = bounded("geocoding", self.timeout, self.geocoder.search(name, None)).await?;
        match unscoped.into_iter().next() {
            Some(location) => {
                info!("Resolved '{}' to {:?}", name, location);
                Ok(location)
            },
            None => Err(AppError::NotFound("city not found".to_string())),
        }
    }

    async fn resolve_coords(&self, latitude: f64, longitude: f64) -> Result<Location> {
        let candidates = bounded(
            "reverse geocoding",
            self.timeout,
            self.geocoder.reverse(latitude, longitude),
        )
        .await?;

        let name = candidates
            .into_iter()
            .map(|l| l.name().to_string())
            .find(|n| !n.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_LOCATION_NAME.to_string());

        info!("Resolved ({}, {}) to '{}'", latitude, longitude, name);
        Location::new(name, latitude, longitude)
    }
}
