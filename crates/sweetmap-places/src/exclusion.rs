//! Denylist filtering of raw candidates.
//!
//! Provider category tagging is patchy, so a candidate is dropped when either
//! its categories or its normalized name hit the rules. Categories are
//! checked first: they are cheaper and provider-authoritative.

use sweetmap_core::{normalize_name, ExclusionRules};

use crate::types::VenueCandidate;

/// Why a candidate was excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionReason<'a> {
    Category(&'a str),
    NamePattern(&'a str),
}

/// Returns the first rule that excludes `candidate`, if any.
#[must_use]
pub fn exclusion_reason<'a>(
    candidate: &'a VenueCandidate,
    rules: &'a ExclusionRules,
) -> Option<ExclusionReason<'a>> {
    if let Some(category) = candidate
        .categories
        .iter()
        .find(|c| rules.excludes_category(c))
    {
        return Some(ExclusionReason::Category(category));
    }

    let name = normalize_name(&candidate.name);
    rules
        .matching_name_pattern(&name)
        .map(ExclusionReason::NamePattern)
}

/// `true` if `candidate` should be dropped under `rules`.
#[must_use]
pub fn is_excluded(candidate: &VenueCandidate, rules: &ExclusionRules) -> bool {
    exclusion_reason(candidate, rules).is_some()
}

/// Keep only candidates the rules allow, preserving order.
#[must_use]
pub fn retain_allowed(
    candidates: Vec<VenueCandidate>,
    rules: &ExclusionRules,
) -> Vec<VenueCandidate> {
    if rules.is_empty() {
        return candidates;
    }

    candidates
        .into_iter()
        .filter(|candidate| match exclusion_reason(candidate, rules) {
            Some(ExclusionReason::Category(category)) => {
                tracing::debug!(
                    provider_id = %candidate.provider_id,
                    name = %candidate.name,
                    category,
                    "excluded by category"
                );
                false
            }
            Some(ExclusionReason::NamePattern(pattern)) => {
                tracing::debug!(
                    provider_id = %candidate.provider_id,
                    name = %candidate.name,
                    pattern,
                    "excluded by name pattern"
                );
                false
            }
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweetmap_core::LatLng;

    fn candidate(id: &str, name: &str, categories: &[&str]) -> VenueCandidate {
        VenueCandidate {
            provider_id: id.to_string(),
            name: name.to_string(),
            location: LatLng::new(37.5, 127.0),
            categories: categories.iter().map(|c| (*c).to_string()).collect(),
            rating: None,
            rating_count: None,
            price_level: None,
            address: None,
        }
    }

    fn rules() -> ExclusionRules {
        ExclusionRules::new(["supermarket"], ["superchainmart", "gs25"]).unwrap()
    }

    #[test]
    fn category_match_excludes() {
        assert!(is_excluded(
            &candidate("B", "Fresh Foods", &["supermarket", "food"]),
            &rules()
        ));
    }

    #[test]
    fn category_match_ignores_case() {
        assert!(is_excluded(
            &candidate("B", "Fresh Foods", &["SuperMarket"]),
            &rules()
        ));
    }

    #[test]
    fn name_match_excludes_without_categories() {
        assert!(is_excluded(
            &candidate("C", "SuperChainMart", &[]),
            &rules()
        ));
    }

    #[test]
    fn name_match_tolerates_case_and_whitespace() {
        assert!(is_excluded(
            &candidate("C", "  GS25   Yeoksam  ", &["store"]),
            &rules()
        ));
    }

    #[test]
    fn unrelated_candidate_is_kept() {
        assert!(!is_excluded(
            &candidate("A", "Cafe Layered", &["cafe", "bakery"]),
            &rules()
        ));
    }

    #[test]
    fn category_reason_reported_before_name_reason() {
        let c = candidate("D", "SuperChainMart", &["supermarket"]);
        let rules = rules();
        assert_eq!(
            exclusion_reason(&c, &rules),
            Some(ExclusionReason::Category("supermarket"))
        );
    }

    #[test]
    fn exclusion_is_complete_over_fixture_grid() {
        let rules = rules();
        let names = ["Cafe", "superchainmart express", "Gs25", "Tart House"];
        let category_sets: [&[&str]; 3] = [&[], &["cafe"], &["cafe", "supermarket"]];

        for name in names {
            for categories in category_sets {
                let c = candidate("x", name, categories);
                let expected = categories.contains(&"supermarket")
                    || normalize_name(name).contains("superchainmart")
                    || normalize_name(name).contains("gs25");
                assert_eq!(
                    is_excluded(&c, &rules),
                    expected,
                    "name={name:?} categories={categories:?}"
                );
            }
        }
    }

    #[test]
    fn retain_allowed_keeps_order_of_survivors() {
        let out = retain_allowed(
            vec![
                candidate("A", "Cafe", &["cafe"]),
                candidate("B", "Mart", &["supermarket"]),
                candidate("C", "Donut Bar", &[]),
                candidate("D", "SuperChainMart", &[]),
            ],
            &rules(),
        );
        let ids: Vec<&str> = out.iter().map(|c| c.provider_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "C"]);
    }

    #[test]
    fn empty_rules_keep_everything() {
        let out = retain_allowed(
            vec![candidate("B", "Mart", &["supermarket"])],
            &ExclusionRules::default(),
        );
        assert_eq!(out.len(), 1);
    }
}
