use serde::{Deserialize, Serialize};

use crate::request::LatLng;

/// Address shown when the provider returned neither a formatted address nor a vicinity.
pub const ADDRESS_UNKNOWN: &str = "address unknown";

/// A normalized venue, ready for the map and list views.
///
/// Optional numeric fields stay `None` when the provider did not report them,
/// so "unrated" is distinguishable from "rated zero".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Stable identifier derived from `source_provider_id` via [`venue_id`].
    pub id: String,
    pub name: String,
    pub address: String,
    pub location: LatLng,
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
    pub price_level: Option<u8>,
    pub source_provider_id: String,
}

/// Compute the stable venue id for a provider place id.
///
/// SHA-256 over `"place" || NUL || provider_id`, hex-encoded. The same
/// provider id always yields the same venue id, across calls and processes.
#[must_use]
pub fn venue_id(provider_id: &str) -> String {
    use sha2::{Digest, Sha256};
    let input = format!("place\x00{provider_id}");
    format!("{:x}", Sha256::digest(input.as_bytes()))
}
