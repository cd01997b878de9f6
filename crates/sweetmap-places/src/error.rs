use sweetmap_core::ValidationError;
use thiserror::Error;

/// Failure of a single keyword search.
///
/// Scoped to one provider call; the coordinator turns it into a
/// [`PartialFailure`] and keeps going.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("provider call timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("rate limited by provider{}", retry_after_hint(.retry_after_secs))]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed provider response: {0}")]
    Malformed(String),

    /// Assigned by the coordinator when a deadline or cancellation token
    /// fires before the search settles. Providers never return it.
    #[error("search cancelled before completion")]
    Cancelled,
}

#[allow(clippy::ref_option)]
fn retry_after_hint(retry_after_secs: &Option<u64>) -> String {
    retry_after_secs.map_or_else(String::new, |secs| format!(" (retry after {secs}s)"))
}

impl ProviderError {
    /// Stable label for structured logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Timeout { .. } => "timeout",
            ProviderError::RateLimited { .. } => "rate_limited",
            ProviderError::Transport(_) => "transport",
            ProviderError::Malformed(_) => "malformed",
            ProviderError::Cancelled => "cancelled",
        }
    }
}

/// A keyword whose search did not contribute results.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialFailure {
    pub keyword: String,
    pub error: ProviderError,
}

impl std::fmt::Display for PartialFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}': {}", self.keyword, self.error)
    }
}

/// Errors that abort a whole discovery call.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("invalid search request: {0}")]
    Validation(#[from] ValidationError),

    #[error("all {} keyword searches failed", .failures.len())]
    AllProvidersFailed { failures: Vec<PartialFailure> },
}
