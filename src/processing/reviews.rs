//! Reputation aggregation over review records

use crate::processing::skills::{to_identifier, to_number};
use crate::store::RawReview;
use std::collections::HashMap;

/// Mean stars and number of rated engagements for one freelancer
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Reputation {
    pub rating: f64,
    pub completed_projects: u32,
}

/// Group reviews by freelancer id. Non-numeric stars are dropped rather than
/// failing the batch, and reviews without a usable id are ignored.
pub fn aggregate_reviews(reviews: &[RawReview]) -> HashMap<String, Reputation> {
    let mut totals: HashMap<String, (f64, u32)> = HashMap::new();

    for review in reviews {
        let Some(freelancer) = to_identifier(&review.freelancer) else {
            continue;
        };
        let entry = totals.entry(freelancer).or_insert((0.0, 0));
        if let Some(stars) = to_number(&review.stars) {
            entry.0 += stars;
            entry.1 += 1;
        }
    }

    totals
        .into_iter()
        .map(|(id, (sum, count))| {
            let rating = if count > 0 { sum / count as f64 } else { 0.0 };
            (
                id,
                Reputation {
                    rating,
                    completed_projects: count,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn review(freelancer: serde_json::Value, stars: serde_json::Value) -> RawReview {
        RawReview { freelancer, stars }
    }

    #[test]
    fn test_mean_and_count() {
        let reviews = vec![
            review(json!("a"), json!(5)),
            review(json!("a"), json!(3)),
            review(json!("b"), json!("4")),
        ];

        let stats = aggregate_reviews(&reviews);

        assert_eq!(stats["a"].rating, 4.0);
        assert_eq!(stats["a"].completed_projects, 2);
        assert_eq!(stats["b"].rating, 4.0);
        assert_eq!(stats["b"].completed_projects, 1);
    }

    #[test]
    fn test_non_numeric_stars_are_dropped() {
        let reviews = vec![
            review(json!("a"), json!("great")),
            review(json!("a"), json!(4)),
            review(json!("b"), json!(null)),
        ];

        let stats = aggregate_reviews(&reviews);

        assert_eq!(stats["a"].rating, 4.0);
        assert_eq!(stats["a"].completed_projects, 1);
        assert_eq!(stats["b"], Reputation::default());
    }

    #[test]
    fn test_numeric_ids_match_string_ids() {
        let reviews = vec![review(json!(7), json!(5)), review(json!("7"), json!(1))];

        let stats = aggregate_reviews(&reviews);

        assert_eq!(stats.len(), 1);
        assert_eq!(stats["7"].rating, 3.0);
    }

    #[test]
    fn test_missing_ids_are_ignored() {
        let reviews = vec![review(json!(null), json!(5))];
        assert!(aggregate_reviews(&reviews).is_empty());
    }
}
