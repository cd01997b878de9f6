//! Search request value type and its validation rules.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest search radius the place-search provider accepts, in meters.
pub const DEFAULT_MAX_RADIUS_METERS: u32 = 50_000;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns `true` when both components are finite and within range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Reasons a [`SearchRequest`] is rejected before any provider call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("search request has no keywords")]
    NoKeywords,

    #[error("search radius {radius_meters}m is outside 1..={max_radius_meters}m")]
    RadiusOutOfRange {
        radius_meters: u32,
        max_radius_meters: u32,
    },

    #[error("search center ({lat}, {lng}) is not a valid coordinate")]
    InvalidCenter { lat: f64, lng: f64 },
}

/// One nearby-venue search: where, how far, and which keywords.
///
/// Deserialization goes through [`SearchRequest::new`], so keywords read
/// from JSON or YAML are trimmed and deduplicated too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SearchRequestFields")]
pub struct SearchRequest {
    center: LatLng,
    radius_meters: u32,
    keywords: Vec<String>,
}

#[derive(Deserialize)]
struct SearchRequestFields {
    center: LatLng,
    radius_meters: u32,
    #[serde(default)]
    keywords: Vec<String>,
}

impl From<SearchRequestFields> for SearchRequest {
    fn from(fields: SearchRequestFields) -> Self {
        Self::new(fields.center, fields.radius_meters, fields.keywords)
    }
}

impl SearchRequest {
    /// Builds a request, trimming keywords and dropping blank and repeated
    /// ones. Repeats are detected case-insensitively; the first spelling wins.
    ///
    /// The result is not validated; call [`SearchRequest::validate`].
    #[must_use]
    pub fn new<I, S>(center: LatLng, radius_meters: u32, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_owned())
            .filter(|k| !k.is_empty())
            .filter(|k| seen.insert(k.to_lowercase()))
            .collect();

        Self {
            center,
            radius_meters,
            keywords,
        }
    }

    #[must_use]
    pub fn center(&self) -> LatLng {
        self.center
    }

    #[must_use]
    pub fn radius_meters(&self) -> u32 {
        self.radius_meters
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Checks the request against the provider's limits.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found: empty keywords, then
    /// radius, then center coordinates.
    pub fn validate(&self, max_radius_meters: u32) -> Result<(), ValidationError> {
        if self.keywords.is_empty() {
            return Err(ValidationError::NoKeywords);
        }

        if self.radius_meters == 0 || self.radius_meters > max_radius_meters {
            return Err(ValidationError::RadiusOutOfRange {
                radius_meters: self.radius_meters,
                max_radius_meters,
            });
        }

        if !self.center.is_valid() {
            return Err(ValidationError::InvalidCenter {
                lat: self.center.lat,
                lng: self.center.lng,
            });
        }

        Ok(())
    }
}
