//! The cascading retrieval engine.
//!
//! Works through one commodity's candidate markets strictly in order,
//! stopping at the first that yields any data. Candidate failures are
//! logged and swallowed; the only caller-visible failure is exhaustion,
//! reported as data inside the result, never as an `Err`. Callers who
//! need a wall-clock bound wrap the whole call (`tokio::time::timeout`)
//! and treat expiry like exhaustion.

use chrono::{Local, NaiveDate};

use mandi_core::{
    crop_seasons, PriceQuery, PriceQueryResult, PriceRecord, PriceSource, QueryMode, SourceError,
};
use mandi_geo::{major_markets, GeoPoint, LocationResolver, ResolvedLocation};

use crate::select::select_latest;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub mode: QueryMode,
    /// Length of the query date window, ending today.
    pub window_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: QueryMode::Both,
            window_days: 14,
        }
    }
}

/// Cascades one commodity lookup across candidate markets via a
/// [`PriceSource`].
pub struct RetrievalEngine<S> {
    source: S,
    config: EngineConfig,
}

impl<S: PriceSource> RetrievalEngine<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, EngineConfig::default())
    }

    pub fn with_config(source: S, config: EngineConfig) -> Self {
        Self { source, config }
    }

    /// Resolve `point` and run the candidate cascade for `commodity`.
    pub async fn price_for_location(
        &self,
        resolver: &LocationResolver,
        point: GeoPoint,
        commodity: &str,
    ) -> PriceQueryResult {
        let resolved = resolver.resolve(point).await;
        self.price_for_resolved(&resolved, commodity).await
    }

    /// Run the candidate cascade against an already-resolved location.
    ///
    /// Pass one: the resolver's candidates, closest first. Pass two: the
    /// state's major-market table, skipping pairs already tried. The
    /// first candidate returning any rows wins and its district overrides
    /// the resolver's initial district guess; probing stops there.
    pub async fn price_for_resolved(
        &self,
        resolved: &ResolvedLocation,
        commodity: &str,
    ) -> PriceQueryResult {
        let date_to = Local::now().date_naive();
        let date_from = date_to - chrono::Duration::days(self.config.window_days);

        let mut tried: Vec<(String, String)> = Vec::new();

        for candidate in &resolved.candidates {
            tried.push((candidate.district.clone(), candidate.market.clone()));
            if let Some(records) = self
                .try_candidate(
                    &candidate.state,
                    &candidate.district,
                    &candidate.market,
                    commodity,
                    date_from,
                    date_to,
                )
                .await
            {
                return Self::success(
                    resolved.state.clone(),
                    candidate.district.clone(),
                    candidate.market.clone(),
                    commodity,
                    records,
                );
            }
        }

        for alternate in major_markets(&resolved.state) {
            if tried
                .iter()
                .any(|(d, m)| d == alternate.district && m == alternate.market)
            {
                continue;
            }
            tried.push((alternate.district.to_owned(), alternate.market.to_owned()));
            if let Some(records) = self
                .try_candidate(
                    &resolved.state,
                    alternate.district,
                    alternate.market,
                    commodity,
                    date_from,
                    date_to,
                )
                .await
            {
                return Self::success(
                    resolved.state.clone(),
                    alternate.district.to_owned(),
                    alternate.market.to_owned(),
                    commodity,
                    records,
                );
            }
        }

        tracing::info!(
            state = %resolved.state,
            district = %resolved.district,
            commodity,
            candidates = tried.len(),
            "every candidate market exhausted"
        );
        PriceQueryResult {
            state: resolved.state.clone(),
            district: resolved.district.clone(),
            market: None,
            commodity: commodity.to_owned(),
            records: Vec::new(),
            latest: None,
            error: Some(format!(
                "No price data found for {commodity} in any market in {state}",
                state = resolved.state
            )),
            seasonal_info: crop_seasons(commodity),
        }
    }

    /// One candidate attempt. `Some(records)` only for a non-empty
    /// result; errors and empty results both mean "fall through".
    async fn try_candidate(
        &self,
        state: &str,
        district: &str,
        market: &str,
        commodity: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Option<Vec<PriceRecord>> {
        let query = PriceQuery {
            state: state.to_owned(),
            district: district.to_owned(),
            market: market.to_owned(),
            commodity: commodity.to_owned(),
            mode: self.config.mode,
            date_from,
            date_to,
        };

        match self.source.fetch_prices(&query).await {
            Ok(records) if records.is_empty() => {
                tracing::debug!(state, district, market, commodity, "candidate returned no rows");
                None
            }
            Ok(records) => {
                tracing::debug!(
                    state,
                    district,
                    market,
                    commodity,
                    rows = records.len(),
                    "candidate returned data"
                );
                Some(records)
            }
            Err(e @ SourceError::SelectionNotFound { .. }) => {
                tracing::warn!(state, district, market, commodity, error = %e, "selection not offered; trying next candidate");
                None
            }
            Err(SourceError::NoDataTable) => {
                tracing::debug!(state, district, market, commodity, "no result table; trying next candidate");
                None
            }
            Err(e @ SourceError::Automation { .. }) => {
                tracing::warn!(state, district, market, commodity, error = %e, "automation failure; trying next candidate");
                None
            }
        }
    }

    fn success(
        state: String,
        district: String,
        market: String,
        commodity: &str,
        records: Vec<PriceRecord>,
    ) -> PriceQueryResult {
        let latest = select_latest(&records, None);
        PriceQueryResult {
            state,
            district,
            market: Some(market),
            commodity: commodity.to_owned(),
            records,
            latest,
            error: None,
            seasonal_info: None,
        }
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
