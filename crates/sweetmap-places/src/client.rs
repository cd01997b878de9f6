//! HTTP client for the place provider's Nearby Search endpoint.
//!
//! One [`PlacesClient::search`] call is one `nearbysearch/json` request. The
//! client owns the per-call timeout and maps every failure onto a
//! [`ProviderError`] kind; it never retries (wrap it in
//! [`crate::RetryingProvider`] for that).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use sweetmap_core::LatLng;

use crate::error::ProviderError;
use crate::provider::VenueProvider;
use crate::types::{NearbySearchResponse, PlaceResult, VenueCandidate};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Per-call timeout used when the caller does not configure one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Place-search client backed by the provider's REST API.
///
/// Use [`PlacesClient::new`] for production or
/// [`PlacesClient::with_base_url`] to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    endpoint: Url,
    timeout: Duration,
    language: Option<String>,
}

impl std::fmt::Debug for PlacesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacesClient")
            .field("api_key", &"[redacted]")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout", &self.timeout)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl PlacesClient {
    /// Creates a client pointed at the production provider.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Transport`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(api_key: &str, timeout: Duration, user_agent: &str) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, timeout, user_agent)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Transport`] if the `reqwest::Client` cannot
    /// be constructed or `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        base_url: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .user_agent(user_agent)
            .build()
            .map_err(|e| ProviderError::Transport(format!("failed to build HTTP client: {e}")))?;

        let endpoint = format!("{}/nearbysearch/json", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&endpoint).map_err(|e| {
            ProviderError::Transport(format!("invalid provider base URL '{base_url}': {e}"))
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
            timeout,
            language: None,
        })
    }

    /// Sets the `language` parameter sent with every search.
    #[must_use]
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language.filter(|l| !l.trim().is_empty());
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the Nearby Search URL. Query values are percent-encoded by
    /// `reqwest::Url`.
    fn search_url(&self, keyword: &str, center: LatLng, radius_meters: u32) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("location", &center.to_string())
                .append_pair("radius", &radius_meters.to_string())
                .append_pair("keyword", keyword);
            if let Some(language) = &self.language {
                query.append_pair("language", language);
            }
            query.append_pair("key", &self.api_key);
        }
        url
    }

    async fn fetch(&self, url: Url, keyword: &str) -> Result<Vec<VenueCandidate>, ProviderError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok());
            return Err(ProviderError::RateLimited { retry_after_secs });
        }

        if !status.is_success() {
            return Err(ProviderError::Transport(format!(
                "unexpected HTTP status {}",
                status.as_u16()
            )));
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        let parsed = serde_json::from_str::<NearbySearchResponse>(&body).map_err(|e| {
            ProviderError::Malformed(format!("nearby search body for '{keyword}': {e}"))
        })?;

        interpret_response(parsed, keyword)
    }

    fn classify(&self, err: reqwest::Error) -> ProviderError {
        // Strip the URL: it carries the API key in its query string.
        let err = err.without_url();
        if err.is_timeout() {
            ProviderError::Timeout {
                after_ms: duration_ms(self.timeout),
            }
        } else if err.is_decode() {
            ProviderError::Malformed(err.to_string())
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl VenueProvider for PlacesClient {
    async fn search(
        &self,
        keyword: &str,
        center: LatLng,
        radius_meters: u32,
    ) -> Result<Vec<VenueCandidate>, ProviderError> {
        let url = self.search_url(keyword, center, radius_meters);
        tracing::debug!(keyword, %center, radius_meters, "nearby search request");

        match tokio::time::timeout(self.timeout, self.fetch(url, keyword)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout {
                after_ms: duration_ms(self.timeout),
            }),
        }
    }
}

/// Maps the provider's `status` envelope onto candidates or an error.
fn interpret_response(
    response: NearbySearchResponse,
    keyword: &str,
) -> Result<Vec<VenueCandidate>, ProviderError> {
    let detail = || {
        response
            .error_message
            .clone()
            .unwrap_or_else(|| "no error message".to_string())
    };

    match response.status.as_str() {
        "OK" => {}
        "ZERO_RESULTS" => return Ok(Vec::new()),
        "OVER_QUERY_LIMIT" => {
            return Err(ProviderError::RateLimited {
                retry_after_secs: None,
            })
        }
        "REQUEST_DENIED" | "INVALID_REQUEST" | "UNKNOWN_ERROR" => {
            return Err(ProviderError::Transport(format!(
                "provider returned {}: {}",
                response.status,
                detail()
            )))
        }
        other => {
            return Err(ProviderError::Malformed(format!(
                "unrecognized provider status '{other}'"
            )))
        }
    }

    let total = response.results.len();
    let candidates: Vec<VenueCandidate> = response
        .results
        .into_iter()
        .filter_map(PlaceResult::into_candidate)
        .collect();

    if candidates.len() < total {
        tracing::debug!(
            keyword,
            skipped = total - candidates.len(),
            "skipped results without place id or coordinates"
        );
    }

    Ok(candidates)
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
