//! Latest-record selection over scraped report rows.

use chrono::NaiveDate;

use mandi_core::PriceRecord;

/// The one report-date format the portal produces (`10 Jan 2024`).
pub const REPORT_DATE_FMT: &str = "%d %b %Y";

/// Picks the most recent record, optionally narrowed to one variety.
///
/// A `variety` filter that matches nothing yields `None` rather than
/// silently widening to unfiltered data — "no data for this variety"
/// stays distinguishable from "no data at all". Records whose report
/// date fails to parse sort after every valid date; ties keep input
/// order (the source publishes at most one row per date per
/// market+variety, so ties carry no meaning).
#[must_use]
pub fn select_latest(records: &[PriceRecord], variety: Option<&str>) -> Option<PriceRecord> {
    let mut filtered: Vec<&PriceRecord> = match variety {
        Some(wanted) => records.iter().filter(|r| r.variety == wanted).collect(),
        None => records.iter().collect(),
    };
    if filtered.is_empty() {
        return None;
    }

    filtered.sort_by_key(|r| std::cmp::Reverse(parsed_report_date(r)));
    Some(filtered[0].clone())
}

/// Unparseable dates map to the oldest possible date so the record sorts
/// last instead of failing the selection.
fn parsed_report_date(record: &PriceRecord) -> NaiveDate {
    NaiveDate::parse_from_str(record.report_date.trim(), REPORT_DATE_FMT)
        .unwrap_or(NaiveDate::MIN)
}
