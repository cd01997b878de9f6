use async_trait::async_trait;
use sweetmap_core::LatLng;

use crate::error::ProviderError;
use crate::types::VenueCandidate;

/// One place-search backend.
///
/// Implementations make exactly one logical search per call and classify
/// their own failures. A search with no matches is `Ok(vec![])`.
/// The coordinator holds providers behind `Arc<dyn VenueProvider>`; the
/// caller constructs them and owns their lifecycle.
#[async_trait]
pub trait VenueProvider: Send + Sync {
    async fn search(
        &self,
        keyword: &str,
        center: LatLng,
        radius_meters: u32,
    ) -> Result<Vec<VenueCandidate>, ProviderError>;
}
