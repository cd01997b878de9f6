//! Normalization from raw provider candidates to [`sweetmap_core::Venue`].

use sweetmap_core::{venue_id, Venue, ADDRESS_UNKNOWN};

use crate::types::VenueCandidate;

/// Converts a candidate into a [`Venue`]. Never fails.
///
/// A missing or blank address becomes [`ADDRESS_UNKNOWN`]. Rating, rating
/// count and price level are carried through as-is; absent stays absent.
#[must_use]
pub fn normalize_candidate(candidate: VenueCandidate) -> Venue {
    let address = candidate
        .address
        .map(|a| a.trim().to_owned())
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| ADDRESS_UNKNOWN.to_string());

    Venue {
        id: venue_id(&candidate.provider_id),
        name: candidate.name.trim().to_owned(),
        address,
        location: candidate.location,
        rating: candidate.rating,
        rating_count: candidate.rating_count,
        price_level: candidate.price_level,
        source_provider_id: candidate.provider_id,
    }
}
