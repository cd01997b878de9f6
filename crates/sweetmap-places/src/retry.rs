//! Retry decorator for place-search providers.
//!
//! The discovery pipeline never retries on its own. Callers that want
//! retry-on-timeout wrap their provider in [`RetryingProvider`] before handing
//! it to the coordinator.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sweetmap_core::LatLng;

use crate::error::ProviderError;
use crate::provider::VenueProvider;
use crate::types::VenueCandidate;

/// Returns `true` if `err` is transient and worth another attempt.
///
/// Retriable: [`ProviderError::Timeout`], [`ProviderError::RateLimited`],
/// [`ProviderError::Transport`].
///
/// Not retriable: [`ProviderError::Malformed`] (the same body would come
/// back) and [`ProviderError::Cancelled`].
fn is_retriable(err: &ProviderError) -> bool {
    matches!(
        err,
        ProviderError::Timeout { .. }
            | ProviderError::RateLimited { .. }
            | ProviderError::Transport(_)
    )
}

/// Executes `operation` with exponential backoff retries on transient errors.
///
/// Sleeps `backoff_base_ms * 2^attempt` milliseconds between attempts, for at
/// most `max_retries` additional attempts after the first. Non-retriable
/// errors and the last error after exhausting retries are returned as-is.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay_ms = backoff_base_ms.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_ms,
            kind = err.kind(),
            error = %err,
            "transient provider error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        attempt += 1;
    }
}

/// Wraps a provider so transient failures are retried with backoff.
#[derive(Debug)]
pub struct RetryingProvider<P> {
    inner: P,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl<P> RetryingProvider<P> {
    /// `max_retries` is the number of additional attempts after the first
    /// failure. `0` makes the wrapper a pass-through.
    #[must_use]
    pub fn new(inner: P, max_retries: u32, backoff_base_ms: u64) -> Self {
        Self {
            inner,
            max_retries,
            backoff_base_ms,
        }
    }

    #[must_use]
    pub fn into_inner(self) -> P {
        self.inner
    }
}

#[async_trait]
impl<P: VenueProvider> VenueProvider for RetryingProvider<P> {
    async fn search(
        &self,
        keyword: &str,
        center: LatLng,
        radius_meters: u32,
    ) -> Result<Vec<VenueCandidate>, ProviderError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.inner.search(keyword, center, radius_meters)
        })
        .await
    }
}
