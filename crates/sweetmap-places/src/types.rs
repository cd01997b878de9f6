//! Raw candidate records and the provider's wire format.

use serde::Deserialize;
use sweetmap_core::LatLng;

/// A venue as returned by one keyword search, before filtering and
/// normalization. Lives only for the duration of a discovery call.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueCandidate {
    /// Provider-assigned place id; unique per provider.
    pub provider_id: String,
    pub name: String,
    pub location: LatLng,
    /// Provider category tags, possibly empty.
    pub categories: Vec<String>,
    /// 0.0–5.0 when present.
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
    pub price_level: Option<u8>,
    /// Formatted address, or the coarse vicinity when that is all the
    /// provider returned.
    pub address: Option<String>,
}

// ---------------------------------------------------------------------------
// Nearby Search response envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaceResult {
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub types: Vec<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub price_level: Option<u8>,
    pub formatted_address: Option<String>,
    pub vicinity: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Geometry {
    pub location: Option<WireLocation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireLocation {
    pub lat: f64,
    pub lng: f64,
}

impl PlaceResult {
    /// Converts a wire record into a candidate.
    ///
    /// Returns `None` when the record lacks a place id or coordinates; such
    /// records can be neither deduplicated nor placed on a map.
    pub(crate) fn into_candidate(self) -> Option<VenueCandidate> {
        let provider_id = self.place_id.filter(|id| !id.trim().is_empty())?;
        let location = self.geometry?.location?;

        let non_blank = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
        let address = non_blank(self.formatted_address).or_else(|| non_blank(self.vicinity));

        // Ratings outside the documented scale are treated as unreported.
        let rating = self
            .rating
            .filter(|r| r.is_finite() && (0.0..=5.0).contains(r));

        Some(VenueCandidate {
            provider_id,
            name: self.name.unwrap_or_default(),
            location: LatLng::new(location.lat, location.lng),
            categories: self.types,
            rating,
            rating_count: self.user_ratings_total,
            price_level: self.price_level,
            address,
        })
    }
}
