//! Discovery orchestration.
//!
//! 1. Validate the request (no provider calls on failure).
//! 2. Spawn one search task per keyword, bounded by a semaphore.
//! 3. Collect each keyword's outcome independently; failures become
//!    [`PartialFailure`]s.
//! 4. Fail with [`DiscoveryError::AllProvidersFailed`] if nothing succeeded.
//! 5. Otherwise merge successful lists in keyword order and run
//!    [`process_candidates`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use sweetmap_core::{ExclusionRules, SearchRequest, Venue, DEFAULT_MAX_RADIUS_METERS};
use tokio::sync::Semaphore;
use tokio::task::{self, JoinSet};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{DiscoveryError, PartialFailure, ProviderError};
use crate::pipeline::process_candidates;
use crate::provider::VenueProvider;
use crate::types::VenueCandidate;

type SearchOutcome = Result<Vec<VenueCandidate>, ProviderError>;

/// Tuning for a [`DiscoveryCoordinator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Largest radius a request may ask for.
    pub max_radius_meters: u32,
    /// Semaphore width for concurrent keyword searches. `None` runs every
    /// keyword at once.
    pub max_concurrency: Option<usize>,
    /// Overall budget for one call. Searches still running when it expires
    /// are recorded as [`ProviderError::Cancelled`].
    pub deadline: Option<Duration>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            max_radius_meters: DEFAULT_MAX_RADIUS_METERS,
            max_concurrency: None,
            deadline: None,
        }
    }
}

/// Result of a discovery call that produced at least one keyword's results.
#[derive(Debug, Clone, PartialEq)]
pub struct Discovery {
    /// Ranked, normalized venues.
    pub venues: Vec<Venue>,
    /// Keywords that failed or were cancelled, in request order.
    pub partial_failures: Vec<PartialFailure>,
}

impl Discovery {
    /// `true` when some keyword searches did not contribute; the venue list
    /// may be incomplete.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.partial_failures.is_empty()
    }
}

/// Runs keyword fan-out against one injected provider.
pub struct DiscoveryCoordinator {
    provider: Arc<dyn VenueProvider>,
    options: DiscoveryOptions,
}

impl DiscoveryCoordinator {
    #[must_use]
    pub fn new(provider: Arc<dyn VenueProvider>, options: DiscoveryOptions) -> Self {
        Self { provider, options }
    }

    #[must_use]
    pub fn options(&self) -> &DiscoveryOptions {
        &self.options
    }

    /// Discover venues near `request.center()`.
    ///
    /// # Errors
    ///
    /// - [`DiscoveryError::Validation`] if the request is malformed; no
    ///   searches are issued.
    /// - [`DiscoveryError::AllProvidersFailed`] if every keyword search
    ///   failed.
    pub async fn discover_nearby_venues(
        &self,
        request: &SearchRequest,
        rules: &ExclusionRules,
    ) -> Result<Discovery, DiscoveryError> {
        self.discover_nearby_venues_with_cancel(request, rules, &CancellationToken::new())
            .await
    }

    /// Same as [`Self::discover_nearby_venues`], but stops waiting on
    /// outstanding searches once `cancel` fires. Their keywords are reported
    /// as [`ProviderError::Cancelled`]; results that already arrived are kept.
    ///
    /// # Errors
    ///
    /// See [`Self::discover_nearby_venues`]. If cancellation leaves no
    /// successful keyword, the call fails with
    /// [`DiscoveryError::AllProvidersFailed`].
    pub async fn discover_nearby_venues_with_cancel(
        &self,
        request: &SearchRequest,
        rules: &ExclusionRules,
        cancel: &CancellationToken,
    ) -> Result<Discovery, DiscoveryError> {
        request.validate(self.options.max_radius_meters)?;

        let outcomes = self.fan_out(request, cancel).await;

        let mut candidates: Vec<VenueCandidate> = Vec::new();
        let mut partial_failures: Vec<PartialFailure> = Vec::new();
        let mut succeeded = 0usize;

        for (keyword, outcome) in request.keywords().iter().zip(outcomes) {
            match outcome {
                Ok(found) => {
                    succeeded += 1;
                    candidates.extend(found);
                }
                Err(error) => partial_failures.push(PartialFailure {
                    keyword: keyword.clone(),
                    error,
                }),
            }
        }

        if succeeded == 0 {
            tracing::error!(
                keywords = request.keywords().len(),
                "all keyword searches failed"
            );
            return Err(DiscoveryError::AllProvidersFailed {
                failures: partial_failures,
            });
        }

        let venues = process_candidates(candidates, rules);

        if partial_failures.is_empty() {
            tracing::info!(
                keywords = request.keywords().len(),
                venues = venues.len(),
                "discovery complete"
            );
        } else {
            tracing::warn!(
                keywords = request.keywords().len(),
                failed = partial_failures.len(),
                venues = venues.len(),
                "discovery complete with partial failures"
            );
        }

        Ok(Discovery {
            venues,
            partial_failures,
        })
    }

    /// Runs every keyword search and returns outcomes in keyword order,
    /// regardless of completion order.
    async fn fan_out(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Vec<SearchOutcome> {
        let keywords = request.keywords();
        let center = request.center();
        let radius_meters = request.radius_meters();
        let width = self
            .options
            .max_concurrency
            .map_or(keywords.len(), |w| w.min(keywords.len()))
            .max(1);
        let semaphore = Arc::new(Semaphore::new(width));

        let mut tasks: JoinSet<(usize, SearchOutcome)> = JoinSet::new();
        let mut task_keywords: HashMap<task::Id, usize> = HashMap::with_capacity(keywords.len());
        for (idx, keyword) in keywords.iter().enumerate() {
            let provider = Arc::clone(&self.provider);
            let semaphore = Arc::clone(&semaphore);
            let keyword = keyword.clone();
            let handle = tasks.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (idx, Err(ProviderError::Cancelled));
                };
                let outcome = provider.search(&keyword, center, radius_meters).await;
                (idx, outcome)
            });
            task_keywords.insert(handle.id(), idx);
        }

        let deadline = self.options.deadline.map(|d| Instant::now() + d);
        let mut slots: Vec<Option<SearchOutcome>> = keywords.iter().map(|_| None).collect();
        let mut interrupted = false;

        loop {
            tokio::select! {
                biased;
                joined = tasks.join_next() => match joined {
                    None => break,
                    Some(Ok((idx, outcome))) => {
                        log_outcome(&keywords[idx], &outcome);
                        slots[idx] = Some(outcome);
                    }
                    Some(Err(err)) => {
                        let Some(&idx) = task_keywords.get(&err.id()) else {
                            tracing::error!(error = %err, "untracked search task failed");
                            continue;
                        };
                        tracing::error!(
                            keyword = %keywords[idx],
                            error = %err,
                            "keyword search task failed"
                        );
                        slots[idx] = Some(Err(ProviderError::Transport(format!(
                            "search task failed: {err}"
                        ))));
                    }
                },
                () = cancel.cancelled() => {
                    tracing::warn!(pending = tasks.len(), "discovery cancelled");
                    interrupted = true;
                    break;
                }
                () = sleep_until_deadline(deadline) => {
                    tracing::warn!(pending = tasks.len(), "discovery deadline reached");
                    interrupted = true;
                    break;
                }
            }
        }

        if interrupted {
            tasks.abort_all();
        }

        slots
            .into_iter()
            .map(|slot| {
                slot.unwrap_or_else(|| {
                    if interrupted {
                        Err(ProviderError::Cancelled)
                    } else {
                        Err(ProviderError::Transport(
                            "search task ended without a result".to_string(),
                        ))
                    }
                })
            })
            .collect()
    }
}

fn log_outcome(keyword: &str, outcome: &SearchOutcome) {
    match outcome {
        Ok(found) => tracing::debug!(keyword, count = found.len(), "keyword search succeeded"),
        Err(err) => tracing::warn!(
            keyword,
            kind = err.kind(),
            error = %err,
            "keyword search failed"
        ),
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending::<()>().await,
    }
}
