//! HTTP client for the Kakao Local search API.
//!
//! Wraps `reqwest` with the `KakaoAK` authorization scheme, typed errors,
//! and automatic retry on transient failures. Both search endpoints return
//! the same envelope; only the first hit's coordinates are of interest.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode, Url};

use crate::error::GeocodeError;
use crate::retry::retry_with_backoff;
use crate::types::{Coord, LocalSearchResponse};

const DEFAULT_BASE_URL: &str = "https://dapi.kakao.com";
const ADDRESS_PATH: &str = "/v2/local/search/address.json";
const KEYWORD_PATH: &str = "/v2/local/search/keyword.json";

/// Client for the Kakao Local search API.
///
/// Use [`KakaoLocalClient::new`] for production or
/// [`KakaoLocalClient::with_base_url`] to point at a mock server in tests.
pub struct KakaoLocalClient {
    client: Client,
    rest_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl KakaoLocalClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        rest_key: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, GeocodeError> {
        Self::with_base_url(rest_key, timeout_secs, max_retries, backoff_base_ms, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the client cannot be constructed or
    /// [`GeocodeError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        rest_key: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("lottang/0.1 (store-geocoding)")
            .build()?;

        let base_url = Url::parse(base_url)
            .map_err(|e| GeocodeError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            client,
            rest_key: rest_key.to_owned(),
            base_url,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Geocode a road/lot address. `None` means the API knows no such place.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::RateLimited`] — HTTP 429 after all retries exhausted.
    /// - [`GeocodeError::UnexpectedStatus`] — non-2xx (5xx retried, 4xx not).
    /// - [`GeocodeError::Http`] — network failure after all retries exhausted.
    /// - [`GeocodeError::Deserialize`] — body is not the expected envelope.
    pub async fn search_address(&self, query: &str) -> Result<Option<Coord>, GeocodeError> {
        self.search(ADDRESS_PATH, query).await
    }

    /// Geocode by free-text keyword (store name plus address works well for
    /// places whose registered address does not resolve).
    ///
    /// # Errors
    ///
    /// Same conditions as [`KakaoLocalClient::search_address`].
    pub async fn search_keyword(&self, query: &str) -> Result<Option<Coord>, GeocodeError> {
        self.search(KEYWORD_PATH, query).await
    }

    async fn search(&self, path: &'static str, query: &str) -> Result<Option<Coord>, GeocodeError> {
        let url = self.build_url(path, query);

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(url.clone())
                    .header(AUTHORIZATION, format!("KakaoAK {}", self.rest_key))
                    .send()
                    .await?;

                let status = response.status();
                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(GeocodeError::RateLimited { retry_after_secs });
                }
                if !status.is_success() {
                    return Err(GeocodeError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let body = response.text().await?;
                let parsed = serde_json::from_str::<LocalSearchResponse>(&body).map_err(|e| {
                    GeocodeError::Deserialize {
                        context: format!("{path}?query={query}"),
                        source: e,
                    }
                })?;

                Ok(parsed
                    .documents
                    .into_iter()
                    .next()
                    .map(|doc| Coord { lat: doc.y, lng: doc.x }))
            }
        })
        .await
    }

    /// Builds the request URL with a properly percent-encoded query.
    fn build_url(&self, path: &str, query: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        url.query_pairs_mut().append_pair("query", query);
        url
    }
}
