//! Synchronous post-processing stages of a discovery call.

use sweetmap_core::{ExclusionRules, Venue};

use crate::dedupe::dedupe;
use crate::exclusion::retain_allowed;
use crate::normalize::normalize_candidate;
use crate::rank::rank;
use crate::types::VenueCandidate;

/// Run dedupe → exclusion → rank → normalize over merged candidates.
///
/// Pure and deterministic: the same input list and rules always produce the
/// same venues in the same order.
#[must_use]
pub fn process_candidates(candidates: Vec<VenueCandidate>, rules: &ExclusionRules) -> Vec<Venue> {
    let merged = candidates.len();
    let unique = dedupe(candidates);
    let unique_count = unique.len();
    let allowed = retain_allowed(unique, rules);

    tracing::debug!(
        merged,
        unique = unique_count,
        allowed = allowed.len(),
        "processed discovery candidates"
    );

    rank(allowed).into_iter().map(normalize_candidate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweetmap_core::LatLng;

    fn candidate(
        id: &str,
        name: &str,
        rating: Option<f64>,
        categories: &[&str],
    ) -> VenueCandidate {
        VenueCandidate {
            provider_id: id.to_string(),
            name: name.to_string(),
            location: LatLng::new(37.5, 127.0),
            categories: categories.iter().map(|c| (*c).to_string()).collect(),
            rating,
            rating_count: None,
            price_level: None,
            address: None,
        }
    }

    #[test]
    fn category_and_name_denylist_scenario() {
        let rules = ExclusionRules::new(["supermarket"], ["superchainmart"]).unwrap();
        let venues = process_candidates(
            vec![
                candidate("A", "Cafe A", Some(4.5), &["cafe"]),
                candidate("B", "Market B", None, &["supermarket"]),
                candidate("C", "SuperChainMart", Some(4.0), &[]),
            ],
            &rules,
        );

        assert_eq!(venues.len(), 1);
        assert_eq!(venues[0].source_provider_id, "A");
        assert_eq!(venues[0].rating, Some(4.5));
    }

    #[test]
    fn duplicate_with_rating_survives_dedupe() {
        let venues = process_candidates(
            vec![
                candidate("X", "Gelato X", None, &[]),
                candidate("X", "Gelato X", Some(3.8), &[]),
            ],
            &ExclusionRules::default(),
        );
        assert_eq!(venues.len(), 1);
        assert_eq!(venues[0].rating, Some(3.8));
    }

    #[test]
    fn dedupe_runs_before_exclusion() {
        // The rated duplicate is excluded by category; the unrated original was
        // replaced by it during dedupe, so the venue disappears entirely.
        let rules = ExclusionRules::new(["supermarket"], Vec::<&str>::new()).unwrap();
        let venues = process_candidates(
            vec![
                candidate("X", "Corner", None, &["cafe"]),
                candidate("X", "Corner", Some(3.0), &["supermarket"]),
            ],
            &rules,
        );
        assert!(venues.is_empty());
    }

    #[test]
    fn output_is_ranked_and_deterministic() {
        let input = vec![
            candidate("a", "a", Some(3.0), &[]),
            candidate("b", "b", None, &[]),
            candidate("c", "c", Some(4.8), &[]),
            candidate("a", "a", Some(1.0), &[]),
        ];
        let first = process_candidates(input.clone(), &ExclusionRules::default());
        let second = process_candidates(input, &ExclusionRules::default());
        assert_eq!(first, second);

        let ids: Vec<&str> = first.iter().map(|v| v.source_provider_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }
}
