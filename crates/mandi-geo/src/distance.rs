//! Great-circle distance and nearest-neighbor search.
//!
//! All proximity ranking in the resolver runs through [`haversine_km`];
//! the Earth-radius constant is load-bearing because fixture distances
//! are derived from it.

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A raw WGS-84 coordinate pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance between two points in kilometers, via the
/// haversine formula.
///
/// Total on all real inputs; callers are responsible for keeping NaN and
/// out-of-range degrees out.
#[must_use]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Nearest candidate to `point` by great-circle distance, with its
/// distance in kilometers.
///
/// Linear scan with a strict `<` comparison: ties keep the
/// first-encountered candidate, which fixes which market gets tried first
/// downstream. Candidates without coordinates are skipped; returns `None`
/// when nothing has coordinates.
pub fn nearest<'a, T, F>(point: GeoPoint, candidates: &'a [T], coords: F) -> Option<(&'a T, f64)>
where
    F: Fn(&T) -> Option<GeoPoint>,
{
    let mut best: Option<(&'a T, f64)> = None;
    for candidate in candidates {
        let Some(p) = coords(candidate) else {
            continue;
        };
        let d = haversine_km(point, p);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((candidate, d)),
        }
    }
    best
}
