//! The pluggable price-source capability.
//!
//! The retrieval engine only ever sees this trait; the production
//! implementation drives a form-based market portal (`mandi-scraper`),
//! and tests substitute canned fakes.

use async_trait::async_trait;

use crate::types::{PriceQuery, PriceRecord};

/// Failure modes a price source can report for one candidate query.
///
/// The retrieval engine treats every variant as "this candidate failed,
/// try the next one" — the distinction exists for observability, not for
/// control flow.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// A required selection was not offered by the source, even after
    /// flexible matching.
    #[error("{field} \"{value}\" not offered by the price source")]
    SelectionNotFound { field: &'static str, value: String },

    /// The query executed but produced no recognizable result table.
    /// Distinct from a recognized table with zero data rows, which is a
    /// valid empty result.
    #[error("no recognizable result table in the source response")]
    NoDataTable,

    /// Transport-level or page-driving failure.
    #[error("automation failure during {stage}: {reason}")]
    Automation { stage: &'static str, reason: String },
}

/// A queryable source of market price rows.
///
/// Implementations own whatever session state a single call needs and
/// release it on every exit path; one in-flight call must never share
/// session state with another, so independent queries can run
/// concurrently.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch all report rows for one (state, district, market, commodity)
    /// combination over the query's date window.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] describing why this candidate could not
    /// be queried. An empty `Vec` is a successful query with no data.
    async fn fetch_prices(&self, query: &PriceQuery) -> Result<Vec<PriceRecord>, SourceError>;
}
