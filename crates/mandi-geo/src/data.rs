//! Reference datasets: district centroids and market locations.
//!
//! Both load from plain JSON arrays on local storage. A missing or
//! malformed file degrades to an empty list — the resolver turns that
//! into its default location, so dataset absence is a policy outcome
//! here, never an error.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::distance::GeoPoint;

/// A known administrative district centroid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationEntry {
    pub state: String,
    pub district: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationEntry {
    #[must_use]
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// A known market. Coordinates may be absent (geocoding failure when the
/// dataset was built); such markets are excluded from proximity ranking
/// but still usable by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketEntry {
    pub state: String,
    pub district: String,
    pub market: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl MarketEntry {
    #[must_use]
    pub fn point(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }
}

/// Load the district centroid dataset, degrading to empty on any failure.
#[must_use]
pub fn load_districts(path: &Path) -> Vec<LocationEntry> {
    load_array(path, "districts")
}

/// Load the market dataset, degrading to empty on any failure.
#[must_use]
pub fn load_markets(path: &Path) -> Vec<MarketEntry> {
    load_array(path, "markets")
}

fn load_array<T: DeserializeOwned>(path: &Path, dataset: &str) -> Vec<T> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                dataset,
                error = %e,
                "reference dataset unreadable; continuing without it"
            );
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                dataset,
                error = %e,
                "reference dataset malformed; continuing without it"
            );
            Vec::new()
        }
    }
}
