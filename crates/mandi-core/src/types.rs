use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::seasons::SeasonalInfo;

/// Which kind of report a market query asks the portal for.
///
/// Matches the visible text of the portal's price/arrival dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryMode {
    Price,
    Arrival,
    #[default]
    Both,
}

impl QueryMode {
    /// The visible option text on the query form.
    #[must_use]
    pub fn form_text(self) -> &'static str {
        match self {
            QueryMode::Price => "Price",
            QueryMode::Arrival => "Arrival",
            QueryMode::Both => "Both",
        }
    }
}

/// Parameters for one market query: a single (state, district, market,
/// commodity) combination over a date window.
#[derive(Debug, Clone)]
pub struct PriceQuery {
    pub state: String,
    pub district: String,
    pub market: String,
    pub commodity: String,
    pub mode: QueryMode,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

/// One scraped market report row.
///
/// Price fields are parsed at extraction time; a blank or unparseable cell
/// becomes `Decimal::ZERO` (see the scraper's `UNPARSED_PRICE` sentinel),
/// so a zero here may mean "no value reported" rather than a free
/// commodity. `min_price <= modal_price <= max_price` is expected of the
/// source but not enforced — violations are upstream data-quality issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRecord {
    pub state: String,
    pub district: String,
    pub market: String,
    pub commodity: String,
    pub variety: String,
    pub grade: String,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub modal_price: Decimal,
    /// Raw report-date cell text (e.g. `"10 Jan 2024"`). Kept unparsed so
    /// a malformed date degrades that record's sort position instead of
    /// failing the whole row.
    pub report_date: String,
    /// Arrival quantity, when the report includes it.
    pub arrivals: Option<Decimal>,
}

/// Terminal output of one commodity lookup.
///
/// `error` is `Some` exactly when `records` is empty and `latest` is
/// `None`; `seasonal_info` is attached only on that exhausted path, and
/// only for crops in the static seasonal table.
#[derive(Debug, Clone, Serialize)]
pub struct PriceQueryResult {
    pub state: String,
    pub district: String,
    /// The market that produced data, `None` when every candidate failed.
    pub market: Option<String>,
    pub commodity: String,
    pub records: Vec<PriceRecord>,
    pub latest: Option<PriceRecord>,
    pub error: Option<String>,
    pub seasonal_info: Option<SeasonalInfo>,
}
