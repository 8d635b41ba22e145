//! Candidate name extraction from search-result titles.

/// Extract the leading token (assumed medicine name) from a result title.
///
/// `-` and `|` count as word separators. Returns the empty string when the
/// title contains no tokens after normalization. Listing titles lead with
/// the product name, so the first token is a cheap candidate without a full
/// NLP pipeline.
pub fn primary_token(title: &str) -> String {
    title
        .replace(['-', '|'], " ")
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_leading_token() {
        assert_eq!(primary_token("Napa 500mg Tablet"), "Napa");
        assert_eq!(primary_token("Maxpro"), "Maxpro");
    }

    #[test]
    fn test_separators_split() {
        assert_eq!(primary_token("Napa Extra - 500mg tablets"), "Napa");
        assert_eq!(primary_token("Napa|MedEx"), "Napa");
        assert_eq!(primary_token("A-Cold Syrup"), "A");
    }

    #[test]
    fn test_leading_whitespace_and_separators() {
        assert_eq!(primary_token("  - | Napa"), "Napa");
    }

    #[test]
    fn test_empty_titles() {
        assert_eq!(primary_token(""), "");
        assert_eq!(primary_token("   "), "");
        assert_eq!(primary_token("-|-"), "");
    }

    proptest! {
        #[test]
        fn prop_idempotent_on_own_output(title in "\\PC{0,60}") {
            let once = primary_token(&title);
            prop_assert_eq!(primary_token(&once), once.clone());
        }

        #[test]
        fn prop_output_has_no_separators(title in "\\PC{0,60}") {
            let token = primary_token(&title);
            prop_assert!(!token.contains('-'));
            prop_assert!(!token.contains('|'));
            prop_assert!(!token.contains(char::is_whitespace));
        }
    }
}
