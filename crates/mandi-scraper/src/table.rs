//! Result-table location and row extraction.
//!
//! The portal renders results under one of several grid ids depending on
//! the query mode, and has historically renamed them; header-content
//! search is the backstop. "No recognizable table" and "recognized table
//! with zero data rows" are deliberately different outcomes — only the
//! former is an error.

use mandi_core::{PriceQuery, PriceRecord};
use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};

/// Grid ids the portal is known to render results under.
const RESULT_TABLE_IDS: &[&str] = &[
    "cphBody_GridViewBoth",
    "cphBody_GridPriceData",
    "cphBody_GridArrivalData",
];

/// Header fragments that identify a result table when no known id is
/// present.
const RESULT_HEADER_MARKERS: &[&str] = &["State Name", "Market Name"];

/// Inline style marking subtotal/summary rows, which carry aggregate
/// values rather than market reports.
const SUMMARY_ROW_MARKER: &str = "background-color:#F9F9F9";

/// Value a price cell gets when the scraped field was blank or
/// unparseable. Indistinguishable from a genuine zero price in the data
/// model — a known precision loss preserved from the upstream source.
pub const UNPARSED_PRICE: Decimal = Decimal::ZERO;

/// Locate the result table: known grid ids first, then any table whose
/// header row mentions a marker column. `None` means no recognizable
/// table anywhere on the page.
pub(crate) fn find_result_table(doc: &Html) -> Option<ElementRef<'_>> {
    for id in RESULT_TABLE_IDS {
        let selector = Selector::parse(&format!("table#{id}")).expect("valid selector");
        if let Some(table) = doc.select(&selector).next() {
            tracing::debug!(table_id = id, "result table found by id");
            return Some(table);
        }
    }

    let table_sel = Selector::parse("table").expect("valid selector");
    let th_sel = Selector::parse("th").expect("valid selector");
    for table in doc.select(&table_sel) {
        let has_marker = table.select(&th_sel).any(|th| {
            let text = th.text().collect::<String>();
            RESULT_HEADER_MARKERS.iter().any(|m| text.contains(m))
        });
        if has_marker {
            tracing::debug!("result table found by header-content search");
            return Some(table);
        }
    }
    None
}

/// Extract data rows into [`PriceRecord`]s.
///
/// Column names come from the table's own header row (units in
/// parentheses stripped); identity columns missing from a row fall back
/// to the query's values. Summary rows and "no data" notice rows are
/// skipped. An empty return is a valid result.
pub(crate) fn parse_result_table(table: ElementRef<'_>, query: &PriceQuery) -> Vec<PriceRecord> {
    let tr_sel = Selector::parse("tr").expect("valid selector");
    let th_sel = Selector::parse("th").expect("valid selector");
    let td_sel = Selector::parse("td").expect("valid selector");

    let headers: Vec<String> = table
        .select(&tr_sel)
        .find_map(|row| {
            let hs: Vec<String> = row
                .select(&th_sel)
                .map(|th| clean_header(&th.text().collect::<String>()))
                .collect();
            if hs.is_empty() {
                None
            } else {
                Some(hs)
            }
        })
        .unwrap_or_default();

    let mut records = Vec::new();
    for row in table.select(&tr_sel) {
        // Header row.
        if row.select(&th_sel).next().is_some() {
            continue;
        }
        // Subtotal/summary styling.
        if row.html().contains(SUMMARY_ROW_MARKER) {
            continue;
        }
        let cells: Vec<String> = row
            .select(&td_sel)
            .map(|td| td.text().collect::<String>().trim().to_owned())
            .collect();
        if cells.is_empty() {
            continue;
        }
        // Single-cell notice row ("No Data Found").
        if cells.len() == 1 && cells[0].to_lowercase().contains("no data") {
            continue;
        }

        let cell = |header: &str| -> Option<&str> {
            headers
                .iter()
                .position(|h| h == header)
                .and_then(|i| cells.get(i))
                .map(String::as_str)
        };
        let identity = |header: &str, fallback: &str| -> String {
            match cell(header) {
                Some(v) if !v.is_empty() => v.to_owned(),
                _ => fallback.to_owned(),
            }
        };

        records.push(PriceRecord {
            state: identity("State Name", &query.state),
            district: identity("District Name", &query.district),
            market: identity("Market Name", &query.market),
            commodity: identity("Commodity", &query.commodity),
            variety: cell("Variety").unwrap_or_default().to_owned(),
            grade: cell("Grade").unwrap_or_default().to_owned(),
            min_price: parse_price_cell(cell("Min Price").unwrap_or_default()),
            max_price: parse_price_cell(cell("Max Price").unwrap_or_default()),
            modal_price: parse_price_cell(cell("Modal Price").unwrap_or_default()),
            report_date: cell("Price Date")
                .or_else(|| cell("Reported Date"))
                .unwrap_or_default()
                .to_owned(),
            arrivals: cell("Arrivals").and_then(parse_optional_cell),
        });
    }

    records
}

/// Strips parenthesized units and surrounding whitespace:
/// `"Min Price (Rs./Quintal)"` → `"Min Price"`.
fn clean_header(raw: &str) -> String {
    raw.split('(').next().unwrap_or(raw).trim().to_owned()
}

/// Parses a price cell, defaulting blanks and junk to [`UNPARSED_PRICE`].
fn parse_price_cell(raw: &str) -> Decimal {
    parse_optional_cell(raw).unwrap_or(UNPARSED_PRICE)
}

fn parse_optional_cell(raw: &str) -> Option<Decimal> {
    raw.trim().replace(',', "").parse::<Decimal>().ok()
}
