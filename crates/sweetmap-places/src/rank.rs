use std::cmp::Ordering;

use crate::types::VenueCandidate;

/// Order candidates best-first.
///
/// Sort key: rating descending (absent or NaN counts as `0.0`), then rating
/// count descending (absent counts as `0`). The sort is stable, so equal
/// candidates keep their input order.
#[must_use]
pub fn rank(mut candidates: Vec<VenueCandidate>) -> Vec<VenueCandidate> {
    candidates.sort_by(compare_rank);
    candidates
}

fn compare_rank(a: &VenueCandidate, b: &VenueCandidate) -> Ordering {
    effective_rating(b)
        .total_cmp(&effective_rating(a))
        .then_with(|| b.rating_count.unwrap_or(0).cmp(&a.rating_count.unwrap_or(0)))
}

fn effective_rating(candidate: &VenueCandidate) -> f64 {
    // `+ 0.0` folds -0.0 into 0.0 so `total_cmp` sees them as equal.
    candidate.rating.filter(|r| !r.is_nan()).unwrap_or(0.0) + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweetmap_core::LatLng;

    fn candidate(id: &str, rating: Option<f64>, rating_count: Option<u32>) -> VenueCandidate {
        VenueCandidate {
            provider_id: id.to_string(),
            name: id.to_string(),
            location: LatLng::new(37.5, 127.0),
            categories: vec![],
            rating,
            rating_count,
            price_level: None,
            address: None,
        }
    }

    fn ids(candidates: &[VenueCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.provider_id.as_str()).collect()
    }

    #[test]
    fn sorts_by_rating_descending() {
        let out = rank(vec![
            candidate("low", Some(3.1), None),
            candidate("high", Some(4.7), None),
            candidate("mid", Some(4.0), None),
        ]);
        assert_eq!(ids(&out), vec!["high", "mid", "low"]);
    }

    #[test]
    fn absent_rating_ranks_as_zero() {
        let out = rank(vec![
            candidate("none", None, Some(900)),
            candidate("one", Some(1.0), None),
        ]);
        assert_eq!(ids(&out), vec!["one", "none"]);
    }

    #[test]
    fn rating_count_breaks_rating_ties() {
        let out = rank(vec![
            candidate("few", Some(4.5), Some(10)),
            candidate("many", Some(4.5), Some(300)),
            candidate("unknown", Some(4.5), None),
        ]);
        assert_eq!(ids(&out), vec!["many", "few", "unknown"]);
    }

    #[test]
    fn full_ties_keep_input_order() {
        let out = rank(vec![
            candidate("first", Some(4.0), Some(5)),
            candidate("second", Some(4.0), Some(5)),
            candidate("third", None, None),
            candidate("fourth", Some(0.0), Some(0)),
        ]);
        assert_eq!(ids(&out), vec!["first", "second", "third", "fourth"]);
    }

    #[test]
    fn nan_rating_is_treated_as_absent() {
        let out = rank(vec![
            candidate("nan", Some(f64::NAN), None),
            candidate("rated", Some(0.5), None),
        ]);
        assert_eq!(ids(&out), vec!["rated", "nan"]);
    }

    #[test]
    fn negative_zero_rating_ties_with_absent_rating() {
        let out = rank(vec![
            candidate("unrated", None, None),
            candidate("zero", Some(-0.0), Some(500)),
        ]);
        assert_eq!(ids(&out), vec!["zero", "unrated"]);
    }

    #[test]
    fn ranking_is_deterministic() {
        let input = vec![
            candidate("a", Some(4.0), Some(1)),
            candidate("b", None, None),
            candidate("c", Some(4.0), Some(1)),
            candidate("d", Some(4.9), None),
        ];
        assert_eq!(rank(input.clone()), rank(input));
    }
}
