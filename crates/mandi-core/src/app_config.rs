use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// District centroid reference dataset (JSON array).
    pub districts_path: PathBuf,
    /// Market reference dataset (JSON array).
    pub markets_path: PathBuf,
    /// Base URL of the market-data portal. Overridable so tests can point
    /// the scraper at a local mock server.
    pub portal_base_url: String,
    /// Reverse-geocoder base URL; `None` disables the remote fallback.
    pub geocoder_base_url: Option<String>,
    pub scraper_request_timeout_secs: u64,
    /// Bound on each dependent-dropdown wait point.
    pub scraper_wait_timeout_secs: u64,
    pub scraper_user_agent: String,
    /// Additional submit attempts after the first, alternating invocation
    /// strategies.
    pub scraper_submit_retries: u32,
    /// Length of the query date window, ending today.
    pub price_window_days: i64,
    pub max_concurrent_commodities: usize,
}
