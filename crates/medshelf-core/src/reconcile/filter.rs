//! Trusted-domain filtering of raw search results.

use super::SearchHit;

/// Keep only hits whose URL contains an allow-listed domain substring.
///
/// Matching is case-insensitive on the URL side; input order is preserved
/// because it drives the reconciler's tie-break.
pub fn filter_trusted(hits: Vec<SearchHit>, allowed_domains: &[String]) -> Vec<SearchHit> {
    hits.into_iter()
        .filter(|hit| {
            let url = hit.url.to_lowercase();
            allowed_domains
                .iter()
                .any(|domain| url.contains(&domain.to_lowercase()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hit(url: &str, title: &str) -> SearchHit {
        SearchHit {
            url: url.into(),
            title: title.into(),
        }
    }

    fn domains(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_keeps_allowed_drops_unknown() {
        let hits = vec![
            hit("https://medex.com.bd/brands/napa", "Napa"),
            hit("https://unknownsite.com/napa", "Napa"),
            hit("https://www.arogga.com/product/1", "Maxpro"),
        ];

        let filtered = filter_trusted(hits, &domains(&["medex", "arogga"]));
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].url, "https://medex.com.bd/brands/napa");
        assert_eq!(filtered[1].url, "https://www.arogga.com/product/1");
    }

    #[test]
    fn test_url_match_is_case_insensitive() {
        let hits = vec![hit("https://MedEx.com.bd/x", "Napa")];
        let filtered = filter_trusted(hits, &domains(&["medex"]));
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_empty_allow_list_drops_everything() {
        let hits = vec![hit("https://medex.com.bd/x", "Napa")];
        assert!(filter_trusted(hits, &[]).is_empty());
    }

    proptest! {
        #[test]
        fn prop_output_is_subsequence(
            urls in proptest::collection::vec("[a-z./:]{1,30}", 0..20),
        ) {
            let hits: Vec<SearchHit> = urls
                .iter()
                .map(|u| hit(u, "title"))
                .collect();
            let allowed = domains(&["med", "ph"]);
            let filtered = filter_trusted(hits.clone(), &allowed);

            // Subsequence: every output appears in input order
            let mut input_iter = hits.iter();
            for kept in &filtered {
                prop_assert!(input_iter.any(|h| h.url == kept.url));
            }

            // Every output matches some allowed domain
            for kept in &filtered {
                prop_assert!(allowed.iter().any(|d| kept.url.to_lowercase().contains(d)));
            }

            // No qualifying input was dropped
            let qualifying = hits
                .iter()
                .filter(|h| allowed.iter().any(|d| h.url.to_lowercase().contains(d)))
                .count();
            prop_assert_eq!(filtered.len(), qualifying);
        }
    }
}
