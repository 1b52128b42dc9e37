//! Multi-commodity lookup.
//!
//! One user request often carries several commodities; each runs its own
//! full cascade with its own source session, so a failure in one never
//! touches the others. Concurrency is bounded because the upstream portal
//! tolerates little parallel traffic.

use std::collections::BTreeMap;

use futures::stream::{self, StreamExt};

use mandi_core::{PriceQueryResult, PriceSource};
use mandi_geo::{GeoPoint, LocationResolver};

use crate::engine::RetrievalEngine;

/// Commodities assumed when the caller names none.
pub const DEFAULT_COMMODITIES: &[&str] = &["Rice", "Wheat"];

/// Look up several commodities for one location.
///
/// The location resolves once (the reference data is read-only and the
/// candidate list is commodity-independent); each commodity then runs
/// [`RetrievalEngine::price_for_resolved`] independently, at most
/// `max_concurrent` in flight.
pub async fn prices_for_location<S: PriceSource>(
    engine: &RetrievalEngine<S>,
    resolver: &LocationResolver,
    point: GeoPoint,
    commodities: &[String],
    max_concurrent: usize,
) -> BTreeMap<String, PriceQueryResult> {
    let commodities: Vec<String> = if commodities.is_empty() {
        DEFAULT_COMMODITIES.iter().map(|c| (*c).to_owned()).collect()
    } else {
        commodities.to_vec()
    };

    let resolved = resolver.resolve(point).await;

    stream::iter(commodities)
        .map(|commodity| {
            let resolved = &resolved;
            async move {
                let result = engine.price_for_resolved(resolved, &commodity).await;
                (commodity, result)
            }
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect::<BTreeMap<_, _>>()
        .await
}
