//! Remote reverse geocoding.
//!
//! Thin client for a Nominatim-compatible `/reverse` endpoint, used by the
//! resolver as a last resort before its hardcoded default. Nominatim's
//! free tier requires a descriptive `User-Agent` and tolerates only light
//! traffic, so this client is built once and reused.

use std::time::Duration;

use crate::distance::GeoPoint;
use crate::error::GeoError;

/// Fallback state when the geocoder response names none, matching the
/// resolver's default region.
const FALLBACK_STATE: &str = "Punjab";

/// Reverse-geocoding client for a Nominatim-compatible endpoint.
pub struct ReverseGeocoder {
    http: reqwest::Client,
    base_url: String,
}

impl ReverseGeocoder {
    /// Creates a geocoder for `base_url` (scheme + host, no trailing
    /// path).
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: impl Into<String>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeoError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    /// Resolve a coordinate to `(state, district)`.
    ///
    /// The district comes from whichever of `county`, `district`, or
    /// `state_district` the endpoint filled in for this region, normalized
    /// via [`normalize_district_name`]; `None` when the response has no
    /// usable district field. A missing state falls back to `"Punjab"`.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::HttpStatus`] on a non-2xx response and
    /// [`GeoError::MissingAddress`] when the payload has no `address`
    /// object.
    pub async fn state_district(
        &self,
        point: GeoPoint,
    ) -> Result<(String, Option<String>), GeoError> {
        let url = format!("{}/reverse", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("lat", point.latitude.to_string()),
                ("lon", point.longitude.to_string()),
                ("format", "json".to_owned()),
                ("addressdetails", "1".to_owned()),
                ("zoom", "10".to_owned()),
                ("accept-language", "en".to_owned()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeoError::HttpStatus {
                status: response.status().as_u16(),
                url,
            });
        }

        let payload = response.json::<serde_json::Value>().await?;
        let address = payload.get("address").ok_or(GeoError::MissingAddress)?;

        let state = address
            .get("state")
            .and_then(serde_json::Value::as_str)
            .unwrap_or(FALLBACK_STATE)
            .to_owned();

        // District lands in a different field depending on the region.
        let district = ["county", "district", "state_district"]
            .iter()
            .find_map(|key| address.get(*key).and_then(serde_json::Value::as_str))
            .map(normalize_district_name)
            .filter(|d| !d.is_empty());

        Ok((state, district))
    }
}

/// Strips administrative suffixes (Tahsil, District, Tehsil, Taluka,
/// Division, Taluk, Mandal, Subdivision) from a district name,
/// case-insensitively, and trims the result.
#[must_use]
pub fn normalize_district_name(district: &str) -> String {
    let re = regex::Regex::new(
        r"(?i)\s+(?:Tahsil|District|Tehsil|Taluka|Division|Taluk|Mandal|Subdivision)\b",
    )
    .expect("valid regex");
    re.replace_all(district, "").trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn normalize_strips_suffixes() {
        assert_eq!(normalize_district_name("Ludhiana District"), "Ludhiana");
        assert_eq!(normalize_district_name("Khanna Tahsil"), "Khanna");
        assert_eq!(normalize_district_name("Khanna tehsil"), "Khanna");
        assert_eq!(normalize_district_name("Ludhiana"), "Ludhiana");
    }

    #[test]
    fn normalize_handles_empty() {
        assert_eq!(normalize_district_name(""), "");
    }

    fn test_geocoder(server: &MockServer) -> ReverseGeocoder {
        ReverseGeocoder::new(server.uri(), 5, "mandi-test/0.1")
            .expect("failed to build test geocoder")
    }

    #[tokio::test]
    async fn resolves_state_and_district() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .and(query_param("zoom", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "address": {
                    "state": "Punjab",
                    "state_district": "Ludhiana District"
                }
            })))
            .mount(&server)
            .await;

        let (state, district) = test_geocoder(&server)
            .state_district(GeoPoint::new(30.9, 75.85))
            .await
            .unwrap();
        assert_eq!(state, "Punjab");
        assert_eq!(district.as_deref(), Some("Ludhiana"));
    }

    #[tokio::test]
    async fn missing_state_falls_back_to_punjab() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "address": { "county": "Khanna Tahsil" }
            })))
            .mount(&server)
            .await;

        let (state, district) = test_geocoder(&server)
            .state_district(GeoPoint::new(30.7, 76.2))
            .await
            .unwrap();
        assert_eq!(state, "Punjab");
        assert_eq!(district.as_deref(), Some("Khanna"));
    }

    #[tokio::test]
    async fn missing_address_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "unable"})))
            .mount(&server)
            .await;

        let result = test_geocoder(&server)
            .state_district(GeoPoint::new(0.0, 0.0))
            .await;
        assert!(matches!(result, Err(GeoError::MissingAddress)));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let result = test_geocoder(&server)
            .state_district(GeoPoint::new(0.0, 0.0))
            .await;
        assert!(matches!(
            result,
            Err(GeoError::HttpStatus { status: 429, .. })
        ));
    }
}
