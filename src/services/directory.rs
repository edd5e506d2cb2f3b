use crate::config::DirectorySettings;
use crate::models::SearchResponse;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::time::{Duration, SystemTime};
use thiserror::Error;

/// Errors that can occur when talking to the Peppol directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited by directory")]
    RateLimited { retry_after: Option<Duration> },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Peppol directory API client
///
/// Stateless apart from its base URL and the pooled HTTP client:
/// - Searching participants by company number
/// - Fetching a single participant's details
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    base_url: String,
    client: Client,
}

impl DirectoryClient {
    /// Create a new directory client with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DirectoryError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn from_settings(settings: &DirectorySettings) -> Result<Self, DirectoryError> {
        Self::new(settings.base_url.clone(), settings.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn participant_url(&self, participant_id: &str) -> String {
        format!(
            "{}/participants/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(participant_id)
        )
    }

    /// Search the directory for a company number
    ///
    /// A 404 is returned as `NotFound`, a 429 as `RateLimited` with the
    /// server's `retry-after` hint (delay-seconds or HTTP-date).
    pub async fn search(&self, identifier: &str) -> Result<SearchResponse, DirectoryError> {
        tracing::debug!("Searching directory for: {}", identifier);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", identifier)])
            .send()
            .await?;

        let response = check_status(response, identifier).await?;
        let json: Value = response.json().await?;

        serde_json::from_value(json).map_err(|e| {
            DirectoryError::InvalidResponse(format!("Failed to parse search result: {}", e))
        })
    }

    /// Fetch the raw participant document
    pub async fn get_participant(&self, participant_id: &str) -> Result<Value, DirectoryError> {
        let url = self.participant_url(participant_id);
        tracing::debug!("Fetching participant details from: {}", url);

        let result = async {
            let response = self.client.get(&url).send().await?;
            let response = check_status(response, participant_id).await?;
            Ok::<Value, DirectoryError>(response.json().await?)
        }
        .await;

        if let Err(e) = &result {
            tracing::error!("Failed to fetch participant {}: {}", participant_id, e);
        }

        result
    }
}

/// Map non-success statuses onto `DirectoryError`
async fn check_status(response: Response, subject: &str) -> Result<Response, DirectoryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::NOT_FOUND => Err(DirectoryError::NotFound(subject.to_string())),
        StatusCode::TOO_MANY_REQUESTS => Err(DirectoryError::RateLimited {
            retry_after: parse_retry_after(response.headers()),
        }),
        _ => {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            Err(DirectoryError::ApiError {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Parse `retry-after` as delay-seconds or an HTTP-date
///
/// Returns `None` when the header is missing, unparseable, negative, or a
/// date already in the past.
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();

    if let Ok(seconds) = value.parse::<i64>() {
        return u64::try_from(seconds).ok().map(Duration::from_secs);
    }

    let at = httpdate::parse_http_date(value).ok()?;
    at.duration_since(SystemTime::now()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_client_creation() {
        let client =
            DirectoryClient::new("https://directory.test/search/1.0/json", Duration::from_secs(10))
                .unwrap();
        assert_eq!(client.base_url(), "https://directory.test/search/1.0/json");
    }

    #[test]
    fn test_participant_url_encodes_id() {
        let client =
            DirectoryClient::new("https://directory.test/json/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.participant_url("iso6523-actorid-upis::0208:0769377373"),
            "https://directory.test/json/participants/iso6523-actorid-upis%3A%3A0208%3A0769377373"
        );
    }

    fn retry_after(value: &str) -> Option<Duration> {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, value.parse().unwrap());
        parse_retry_after(&headers)
    }

    #[test]
    fn test_retry_after_seconds() {
        assert_eq!(retry_after("2"), Some(Duration::from_secs(2)));
        assert_eq!(retry_after("  7 "), Some(Duration::from_secs(7)));
        assert_eq!(retry_after("0"), Some(Duration::ZERO));
    }

    #[test]
    fn test_retry_after_rejects_bad_values() {
        assert_eq!(retry_after("-3"), None);
        assert_eq!(retry_after("2.5"), None);
        assert_eq!(retry_after("soon"), None);
        assert_eq!(parse_retry_after(&HeaderMap::new()), None);
    }

    #[test]
    fn test_retry_after_http_date() {
        let in_a_minute = SystemTime::now() + Duration::from_secs(60);
        let wait = retry_after(&httpdate::fmt_http_date(in_a_minute)).unwrap();
        // HTTP-date has one second resolution
        assert!(wait > Duration::from_secs(57) && wait <= Duration::from_secs(60));

        assert_eq!(retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
    }

    #[test]
    fn test_from_settings_uses_configured_url() {
        let settings = DirectorySettings::with_base_url("http://127.0.0.1:1/search");
        let client = DirectoryClient::from_settings(&settings).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:1/search");
    }
}
