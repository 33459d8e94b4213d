//! Cookie-carrying HTTP session for the lottery endpoints.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, CONTENT_TYPE, REFERER};
use reqwest::Client;

use crate::error::ScrapeError;
use crate::types::ScrapeConfig;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// A reusable session against one endpoint variant (desktop or mobile).
///
/// The site hands out `JSESSIONID`-style cookies on the listing page and some
/// detail views misbehave without them, so [`Session::open`] performs one
/// best-effort warm-up GET against the referer before any real request.
pub struct Session {
    client: Client,
}

impl Session {
    /// Build a client with the fixed identity headers plus `referer`, then
    /// warm it up against `referer` to collect server cookies.
    ///
    /// Warm-up failure is swallowed: cookie acquisition is an optimization,
    /// not a precondition, and later requests simply proceed without cookies.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ScrapeError::InvalidHeader`] if a
    /// configured header value is not a legal HTTP header.
    pub async fn open(config: &ScrapeConfig, referer: &str) -> Result<Self, ScrapeError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            header_value("Accept-Language", &config.accept_language)?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        headers.insert(REFERER, header_value("Referer", referer)?);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .cookie_store(true)
            .build()?;

        if let Err(err) = client.get(referer).send().await {
            tracing::debug!(referer, error = %err, "session warm-up failed; continuing without cookies");
        }

        Ok(Self { client })
    }

    /// GET `base` with the given query parameters and return the body.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::Http`] on network failure, [`ScrapeError::UnexpectedStatus`]
    /// on a non-2xx response.
    pub async fn get_html(&self, base: &str, query: &[(&str, &str)]) -> Result<String, ScrapeError> {
        let response = self.client.get(base).query(query).send().await?;
        Self::body_checked(response).await
    }

    /// POST a form body to `base` with the given query parameters and return
    /// the response body.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::Http`] on network failure, [`ScrapeError::UnexpectedStatus`]
    /// on a non-2xx response.
    pub async fn post_form(
        &self,
        base: &str,
        query: &[(&str, &str)],
        form: &[(&str, &str)],
    ) -> Result<String, ScrapeError> {
        let response = self
            .client
            .post(base)
            .query(query)
            .form(form)
            .send()
            .await?;
        Self::body_checked(response).await
    }

    async fn body_checked(response: reqwest::Response) -> Result<String, ScrapeError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, ScrapeError> {
    HeaderValue::from_str(value).map_err(|e| ScrapeError::InvalidHeader {
        name,
        reason: e.to_string(),
    })
}
