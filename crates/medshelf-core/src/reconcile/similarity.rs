//! Fuzzy string similarity for medicine names.

use strsim::normalized_levenshtein;

/// Compute case-insensitive similarity between two strings (0.0 - 1.0).
///
/// Normalized edit-distance ratio: identical strings score 1.0 (including
/// two empty strings), an empty string against a non-empty one scores 0.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(&a.to_lowercase(), &b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identical_strings() {
        assert_eq!(similarity("Napa", "Napa"), 1.0);
        assert_eq!(similarity("Napa", "napa"), 1.0);
        assert_eq!(similarity("NAPA", "napa"), 1.0);
    }

    #[test]
    fn test_empty_strings() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("Napa", ""), 0.0);
        assert_eq!(similarity("", "Napa"), 0.0);
    }

    #[test]
    fn test_typo_scores_high() {
        assert!(similarity("Paracetamol", "Paracetamal") > 0.85);
    }

    #[test]
    fn test_different_names_score_low() {
        assert!(similarity("Zyrtek", "Napa") < 0.7);
        assert!(similarity("Esomeprazole", "Paracetamol") < 0.7);
    }

    proptest! {
        #[test]
        fn prop_self_similarity_is_one(s in "\\PC{0,40}") {
            prop_assert!((similarity(&s, &s) - 1.0).abs() < 1e-12);
        }

        #[test]
        fn prop_empty_vs_non_empty_is_zero(s in "\\PC{1,40}") {
            prop_assert_eq!(similarity(&s, ""), 0.0);
            prop_assert_eq!(similarity("", &s), 0.0);
        }

        #[test]
        fn prop_score_in_unit_interval(a in "\\PC{0,40}", b in "\\PC{0,40}") {
            let score = similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&score));
        }

        #[test]
        fn prop_case_insensitive(a in "[a-zA-Z]{0,20}", b in "[a-zA-Z]{0,20}") {
            let folded = similarity(&a.to_lowercase(), &b.to_lowercase());
            prop_assert!((similarity(&a, &b) - folded).abs() < 1e-12);
        }
    }
}
