//! Nearby-venue discovery for SweetMap.
//!
//! Fans keyword searches out to a place-search provider, merges the results,
//! drops denylisted categories and chain brands, ranks what is left, and
//! normalizes it into [`sweetmap_core::Venue`] records.

pub mod client;
pub mod dedupe;
pub mod discovery;
pub mod error;
pub mod exclusion;
pub mod normalize;
pub mod pipeline;
pub mod provider;
pub mod rank;
pub mod retry;
pub mod types;

pub use client::PlacesClient;
pub use dedupe::dedupe;
pub use discovery::{Discovery, DiscoveryCoordinator, DiscoveryOptions};
pub use error::{DiscoveryError, PartialFailure, ProviderError};
pub use exclusion::{is_excluded, retain_allowed};
pub use normalize::normalize_candidate;
pub use pipeline::process_candidates;
pub use provider::VenueProvider;
pub use rank::rank;
pub use retry::RetryingProvider;
pub use types::VenueCandidate;
pub use tokio_util::sync::CancellationToken;
