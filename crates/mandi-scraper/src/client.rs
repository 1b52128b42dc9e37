//! Agmarknet query-form driver.
//!
//! One [`AgmarknetClient::fetch_prices`] call owns one scrape session: a
//! fresh cookie jar plus the page's form state, walked through the
//! portal's dropdown cascade and released on every exit path. The portal
//! markup is a volatile external contract — element names and grid ids
//! here mirror what it serves today, not a stable API.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::NaiveDate;
use scraper::Html;

use mandi_core::{PriceQuery, PriceRecord, PriceSource, SourceError};

use crate::error::ScrapeError;
use crate::form::{is_placeholder, match_option_exact, match_option_flexible, MatchKind};
use crate::page::FormPage;
use crate::table::{find_result_table, parse_result_table};

pub const QUERY_PAGE_PATH: &str = "/SearchCmmMkt.aspx";

const MODE_SELECT: &str = "ddlArrivalPrice";
const COMMODITY_SELECT: &str = "ddlCommodity";
const STATE_SELECT: &str = "ddlState";
const DISTRICT_SELECT: &str = "ddlDistrict";
const MARKET_SELECT: &str = "ddlMarket";
const DATE_FROM_INPUT: &str = "txtDate";
const DATE_TO_INPUT: &str = "txtDateTo";
const SUBMIT_BUTTON: &str = "btnGo";
const SUBMIT_LABEL: &str = "Go";

/// Date format the portal's date fields accept (`27-Jul-2023`).
const FORM_DATE_FMT: &str = "%d-%b-%Y";

/// Re-poll interval while waiting for a dependent dropdown to populate.
const DEPENDENT_POLL_MS: u64 = 500;

/// Drives the market portal's form-based query page.
///
/// The client itself is cheap shared configuration; each query builds its
/// own HTTP client (own cookie jar), so concurrent lookups never share
/// session state.
pub struct AgmarknetClient {
    base_url: String,
    request_timeout_secs: u64,
    wait_timeout_secs: u64,
    user_agent: String,
    submit_retries: u32,
}

impl AgmarknetClient {
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        request_timeout_secs: u64,
        wait_timeout_secs: u64,
        user_agent: impl Into<String>,
        submit_retries: u32,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            request_timeout_secs,
            wait_timeout_secs,
            user_agent: user_agent.into(),
            submit_retries,
        }
    }

    /// Walks the full query flow for one candidate and parses the result
    /// table.
    ///
    /// # Errors
    ///
    /// Any [`ScrapeError`]; the session is released regardless.
    async fn run_query(&self, query: &PriceQuery) -> Result<Vec<PriceRecord>, ScrapeError> {
        let mut session = QuerySession::open(self).await?;

        session.select_exact(MODE_SELECT, "price/arrival mode", query.mode.form_text())?;
        session.postback(MODE_SELECT).await?;

        session.select_exact(COMMODITY_SELECT, "commodity", &query.commodity)?;
        session.postback(COMMODITY_SELECT).await?;

        session.select_exact(STATE_SELECT, "state", &query.state)?;
        session.postback(STATE_SELECT).await?;

        session
            .wait_for_dependent(DISTRICT_SELECT, "district", STATE_SELECT)
            .await?;
        session.select_flexible(DISTRICT_SELECT, "district", &query.district)?;
        session.postback(DISTRICT_SELECT).await?;

        session
            .wait_for_dependent(MARKET_SELECT, "market", DISTRICT_SELECT)
            .await?;
        session.select_flexible(MARKET_SELECT, "market", &query.market)?;

        session.set_dates(query.date_from, query.date_to);
        let results_html = session.submit().await?;

        let doc = Html::parse_document(&results_html);
        let table = find_result_table(&doc).ok_or(ScrapeError::NoDataTable)?;
        Ok(parse_result_table(table, query))
    }
}

#[async_trait]
impl PriceSource for AgmarknetClient {
    async fn fetch_prices(&self, query: &PriceQuery) -> Result<Vec<PriceRecord>, SourceError> {
        self.run_query(query).await.map_err(SourceError::from)
    }
}

/// One scrape session: a dedicated cookie jar and the current form state.
/// Dropped (and thereby released) on every exit path of `run_query`.
struct QuerySession<'a> {
    client: &'a AgmarknetClient,
    http: reqwest::Client,
    page_url: String,
    page: FormPage,
}

impl<'a> QuerySession<'a> {
    async fn open(client: &'a AgmarknetClient) -> Result<Self, ScrapeError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(client.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&client.user_agent)
            .cookie_store(true)
            .build()?;

        let page_url = format!("{}{QUERY_PAGE_PATH}", client.base_url);
        let html = http
            .get(&page_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let page = FormPage::parse(&html)?;

        Ok(Self {
            client,
            http,
            page_url,
            page,
        })
    }

    /// Exact-match selection for fields the portal spells canonically.
    fn select_exact(
        &mut self,
        select_name: &str,
        field: &'static str,
        wanted: &str,
    ) -> Result<(), ScrapeError> {
        let options = self
            .page
            .options(select_name)
            .ok_or_else(|| ScrapeError::MalformedPage {
                element: select_name.to_owned(),
            })?;
        let option =
            match_option_exact(options, wanted).ok_or_else(|| ScrapeError::SelectionNotFound {
                field,
                value: wanted.to_owned(),
            })?;
        let value = option.value.clone();
        self.page.set_select(select_name, value);
        Ok(())
    }

    /// Flexible selection for district/market, mirroring the portal's
    /// inconsistent spellings: exact, then case-insensitive/substring,
    /// then first available.
    fn select_flexible(
        &mut self,
        select_name: &str,
        field: &'static str,
        wanted: &str,
    ) -> Result<(), ScrapeError> {
        let options = self
            .page
            .options(select_name)
            .ok_or_else(|| ScrapeError::MalformedPage {
                element: select_name.to_owned(),
            })?;
        let (option, kind) =
            match_option_flexible(options, wanted).ok_or_else(|| ScrapeError::SelectionNotFound {
                field,
                value: wanted.to_owned(),
            })?;
        match kind {
            MatchKind::Exact => {}
            MatchKind::Fuzzy => {
                tracing::debug!(field, wanted, chosen = %option.text, "using close option match");
            }
            MatchKind::FirstAvailable => {
                tracing::debug!(
                    field,
                    wanted,
                    chosen = %option.text,
                    "no option match; using first available"
                );
            }
        }
        let value = option.value.clone();
        self.page.set_select(select_name, value);
        Ok(())
    }

    /// Fires the postback the named control triggers and swaps in the
    /// returned page state.
    async fn postback(&mut self, event_target: &str) -> Result<(), ScrapeError> {
        let body = self.page.postback_body(event_target);
        let html = self
            .http
            .post(&self.page_url)
            .form(&body)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        self.page = FormPage::parse(&html)?;
        Ok(())
    }

    /// Bounded wait for a dependent dropdown to populate, re-firing the
    /// upstream control's postback between polls.
    async fn wait_for_dependent(
        &mut self,
        select_name: &str,
        field: &'static str,
        refresh_target: &str,
    ) -> Result<(), ScrapeError> {
        let timeout = Duration::from_secs(self.client.wait_timeout_secs);
        let started = Instant::now();
        loop {
            let populated = self
                .page
                .options(select_name)
                .is_some_and(|opts| opts.iter().any(|o| !is_placeholder(&o.text)));
            if populated {
                return Ok(());
            }
            if started.elapsed() >= timeout {
                return Err(ScrapeError::DependentListTimeout {
                    field,
                    timeout_secs: self.client.wait_timeout_secs,
                });
            }
            tokio::time::sleep(Duration::from_millis(DEPENDENT_POLL_MS)).await;
            self.postback(refresh_target).await?;
        }
    }

    fn set_dates(&mut self, from: NaiveDate, to: NaiveDate) {
        self.page
            .set_text(DATE_FROM_INPUT, from.format(FORM_DATE_FMT).to_string());
        self.page
            .set_text(DATE_TO_INPUT, to.format(FORM_DATE_FMT).to_string());
    }

    /// Submits the query, alternating invocation strategies: the
    /// button-value post first, then the `__EVENTTARGET` postback the
    /// page's own script fires when the plain click is intercepted.
    async fn submit(&mut self) -> Result<String, ScrapeError> {
        let attempts = self.client.submit_retries.saturating_add(1);
        let mut last_reason = String::new();
        for attempt in 0..attempts {
            let body = if attempt % 2 == 0 {
                self.page.submit_body(SUBMIT_BUTTON, SUBMIT_LABEL)
            } else {
                self.page.postback_body(SUBMIT_BUTTON)
            };
            match self.http.post(&self.page_url).form(&body).send().await {
                Ok(response) if response.status().is_success() => {
                    return Ok(response.text().await?)
                }
                Ok(response) => {
                    last_reason = format!("unexpected status {}", response.status());
                }
                Err(e) => last_reason = e.to_string(),
            }
            tracing::debug!(
                attempt,
                reason = %last_reason,
                "submit attempt failed; trying alternate strategy"
            );
        }
        Err(ScrapeError::SubmitFailed {
            attempts,
            reason: last_reason,
        })
    }
}
