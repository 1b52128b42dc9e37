use crate::app_config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env
/// vars. Every key has a default, so a bare environment is valid.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in
/// the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful
/// for testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<i64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("MANDI_LOG_LEVEL", "info");
    let districts_path = PathBuf::from(or_default(
        "MANDI_DISTRICTS_PATH",
        "./data/districts_database.json",
    ));
    let markets_path = PathBuf::from(or_default(
        "MANDI_MARKETS_PATH",
        "./data/markets_database.json",
    ));
    let portal_base_url = or_default("MANDI_PORTAL_BASE_URL", "https://agmarknet.gov.in");

    // Empty string disables the remote reverse-geocode fallback.
    let geocoder_base_url = {
        let raw = or_default(
            "MANDI_GEOCODER_BASE_URL",
            "https://nominatim.openstreetmap.org",
        );
        if raw.is_empty() { None } else { Some(raw) }
    };

    let scraper_request_timeout_secs = parse_u64("MANDI_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    let scraper_wait_timeout_secs = parse_u64("MANDI_SCRAPER_WAIT_TIMEOUT_SECS", "12")?;
    let scraper_user_agent = or_default("MANDI_SCRAPER_USER_AGENT", "mandi/0.1 (price-lookup)");
    let scraper_submit_retries = parse_u32("MANDI_SCRAPER_SUBMIT_RETRIES", "2")?;
    let price_window_days = parse_i64("MANDI_PRICE_WINDOW_DAYS", "14")?;
    let max_concurrent_commodities = parse_usize("MANDI_MAX_CONCURRENT_COMMODITIES", "1")?;

    Ok(AppConfig {
        log_level,
        districts_path,
        markets_path,
        portal_base_url,
        geocoder_base_url,
        scraper_request_timeout_secs,
        scraper_wait_timeout_secs,
        scraper_user_agent,
        scraper_submit_retries,
        price_window_days,
        max_concurrent_commodities,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_succeeds_on_empty_environment() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.log_level, "info");
        assert_eq!(
            cfg.districts_path.to_string_lossy(),
            "./data/districts_database.json"
        );
        assert_eq!(cfg.portal_base_url, "https://agmarknet.gov.in");
        assert_eq!(
            cfg.geocoder_base_url.as_deref(),
            Some("https://nominatim.openstreetmap.org")
        );
        assert_eq!(cfg.scraper_request_timeout_secs, 30);
        assert_eq!(cfg.scraper_wait_timeout_secs, 12);
        assert_eq!(cfg.scraper_user_agent, "mandi/0.1 (price-lookup)");
        assert_eq!(cfg.scraper_submit_retries, 2);
        assert_eq!(cfg.price_window_days, 14);
        assert_eq!(cfg.max_concurrent_commodities, 1);
    }

    #[test]
    fn portal_base_url_override() {
        let mut map = HashMap::new();
        map.insert("MANDI_PORTAL_BASE_URL", "http://127.0.0.1:9000");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.portal_base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn empty_geocoder_url_disables_fallback() {
        let mut map = HashMap::new();
        map.insert("MANDI_GEOCODER_BASE_URL", "");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.geocoder_base_url.is_none());
    }

    #[test]
    fn wait_timeout_override() {
        let mut map = HashMap::new();
        map.insert("MANDI_SCRAPER_WAIT_TIMEOUT_SECS", "3");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.scraper_wait_timeout_secs, 3);
    }

    #[test]
    fn wait_timeout_invalid() {
        let mut map = HashMap::new();
        map.insert("MANDI_SCRAPER_WAIT_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MANDI_SCRAPER_WAIT_TIMEOUT_SECS"),
            "expected InvalidEnvVar(MANDI_SCRAPER_WAIT_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn price_window_days_override() {
        let mut map = HashMap::new();
        map.insert("MANDI_PRICE_WINDOW_DAYS", "30");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.price_window_days, 30);
    }

    #[test]
    fn price_window_days_invalid() {
        let mut map = HashMap::new();
        map.insert("MANDI_PRICE_WINDOW_DAYS", "two-weeks");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MANDI_PRICE_WINDOW_DAYS"),
            "expected InvalidEnvVar(MANDI_PRICE_WINDOW_DAYS), got: {result:?}"
        );
    }

    #[test]
    fn max_concurrent_commodities_override() {
        let mut map = HashMap::new();
        map.insert("MANDI_MAX_CONCURRENT_COMMODITIES", "4");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.max_concurrent_commodities, 4);
    }

    #[test]
    fn submit_retries_invalid() {
        let mut map = HashMap::new();
        map.insert("MANDI_SCRAPER_SUBMIT_RETRIES", "-1");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MANDI_SCRAPER_SUBMIT_RETRIES"),
            "expected InvalidEnvVar(MANDI_SCRAPER_SUBMIT_RETRIES), got: {result:?}"
        );
    }
}
