//! Coordinate → (state, district, ranked markets) resolution.
//!
//! Resolution order: local district database, then the remote reverse
//! geocoder (when configured), then a hardcoded default region. The
//! default keeps the pipeline answering even with no reference data at
//! all; callers get a possibly-wrong region instead of a failure.

use serde::Serialize;

use crate::data::{LocationEntry, MarketEntry};
use crate::distance::{haversine_km, nearest, GeoPoint};
use crate::geocode::ReverseGeocoder;
use crate::markets::major_markets;

pub const DEFAULT_STATE: &str = "Punjab";
pub const DEFAULT_DISTRICT: &str = "Ludhiana";

/// One (state, district, market) triple to try, in priority order.
#[derive(Debug, Clone, Serialize)]
pub struct QueryCandidate {
    pub state: String,
    pub district: String,
    pub market: String,
    /// Zero-based priority; closer markets get lower ranks.
    pub rank: usize,
    /// Distance from the query point; `None` for markets without
    /// coordinates (always ranked after those with).
    pub distance_km: Option<f64>,
}

/// Output of one resolution: the chosen region plus the ordered market
/// candidates for the retrieval cascade. `candidates` is never empty.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedLocation {
    pub state: String,
    pub district: String,
    pub candidates: Vec<QueryCandidate>,
}

/// Resolves raw coordinates against the reference datasets.
///
/// Datasets are plain constructor inputs so tests can point at fixtures;
/// both are read-only after load and safe to share across concurrent
/// queries.
pub struct LocationResolver {
    districts: Vec<LocationEntry>,
    markets: Vec<MarketEntry>,
    geocoder: Option<ReverseGeocoder>,
}

impl LocationResolver {
    #[must_use]
    pub fn new(districts: Vec<LocationEntry>, markets: Vec<MarketEntry>) -> Self {
        Self {
            districts,
            markets,
            geocoder: None,
        }
    }

    /// Builds a resolver from the reference dataset files, degrading to
    /// empty datasets (and therefore the default region) on any load
    /// failure.
    #[must_use]
    pub fn from_files(districts_path: &std::path::Path, markets_path: &std::path::Path) -> Self {
        Self::new(
            crate::data::load_districts(districts_path),
            crate::data::load_markets(markets_path),
        )
    }

    /// Enables the remote reverse-geocode fallback.
    #[must_use]
    pub fn with_geocoder(mut self, geocoder: ReverseGeocoder) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    /// Resolve `point` to a region and an ordered market candidate list.
    ///
    /// Never fails: an empty district database falls through to the
    /// reverse geocoder (when configured), and any geocoding failure falls
    /// through to the default region.
    pub async fn resolve(&self, point: GeoPoint) -> ResolvedLocation {
        if let Some((entry, distance_km)) = nearest(point, &self.districts, |d| Some(d.point())) {
            tracing::debug!(
                state = %entry.state,
                district = %entry.district,
                distance_km,
                "resolved location from district database"
            );
            return self.resolved_for(entry.state.clone(), entry.district.clone(), point);
        }

        if let Some(geocoder) = &self.geocoder {
            match geocoder.state_district(point).await {
                Ok((state, district)) => {
                    let district = district.unwrap_or_else(|| DEFAULT_DISTRICT.to_owned());
                    tracing::debug!(%state, %district, "resolved location via reverse geocoder");
                    return self.resolved_for(state, district, point);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "reverse geocoding failed; using default location");
                }
            }
        }

        tracing::warn!(
            "no reference data and no geocoder result; falling back to default location"
        );
        self.resolved_for(DEFAULT_STATE.to_owned(), DEFAULT_DISTRICT.to_owned(), point)
    }

    /// Ranks the known markets of `(state, district)` by distance to
    /// `point`. Markets without coordinates keep their dataset order after
    /// all ranked ones; a district with no known markets falls back to the
    /// state's major-market table.
    fn resolved_for(&self, state: String, district: String, point: GeoPoint) -> ResolvedLocation {
        let mut ranked: Vec<(&MarketEntry, f64)> = Vec::new();
        let mut unranked: Vec<&MarketEntry> = Vec::new();
        for market in self
            .markets
            .iter()
            .filter(|m| m.state == state && m.district == district)
        {
            match market.point() {
                Some(p) => ranked.push((market, haversine_km(point, p))),
                None => unranked.push(market),
            }
        }
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

        let mut candidates: Vec<QueryCandidate> = ranked
            .into_iter()
            .map(|(m, d)| (m, Some(d)))
            .chain(unranked.into_iter().map(|m| (m, None)))
            .enumerate()
            .map(|(rank, (m, distance_km))| QueryCandidate {
                state: m.state.clone(),
                district: m.district.clone(),
                market: m.market.clone(),
                rank,
                distance_km,
            })
            .collect();

        if candidates.is_empty() {
            candidates = major_markets(&state)
                .iter()
                .enumerate()
                .map(|(rank, m)| QueryCandidate {
                    state: state.clone(),
                    district: m.district.to_owned(),
                    market: m.market.to_owned(),
                    rank,
                    distance_km: None,
                })
                .collect();
        }

        ResolvedLocation {
            state,
            district,
            candidates,
        }
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
