//! Golden tests for name reconciliation.
//!
//! Each case pins the outcome for a fixed provider response, so ranking and
//! tie-break behavior cannot drift silently.

use medshelf_core::models::ReconcileOutcome;
use medshelf_core::reconcile::{
    Reconciler, ReconcilerConfig, SearchError, SearchHit, SearchProvider,
};

struct FixedProvider {
    hits: Vec<SearchHit>,
}

impl SearchProvider for FixedProvider {
    fn search(
        &self,
        _query: &str,
        _max_results: u32,
        _region: Option<&str>,
    ) -> Result<Vec<SearchHit>, SearchError> {
        Ok(self.hits.clone())
    }
}

struct GoldenCase {
    id: &'static str,
    hits: Vec<(&'static str, &'static str)>,
    query: &'static str,
    reference: &'static str,
    threshold: f64,
    expected: ReconcileOutcome,
}

fn golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "napa-exact-trusted",
            hits: vec![
                ("https://medex.com.bd/x", "Napa Extra - 500mg tablets"),
                ("https://unknownsite.com/y", "Napa 500mg"),
            ],
            query: "Tab. Napa 500 mg",
            reference: "Napa",
            threshold: 0.7,
            expected: ReconcileOutcome::Matched {
                name: "Napa".into(),
                score: 1.0,
            },
        },
        GoldenCase {
            id: "zyrtek-vs-napa-unmatched",
            hits: vec![("https://medex.com.bd/x", "Napa Extra - 500mg tablets")],
            query: "Tab. Zyrtek 10 mg",
            reference: "Zyrtek",
            threshold: 0.7,
            expected: ReconcileOutcome::Unmatched,
        },
        GoldenCase {
            id: "no-results-unmatched",
            hits: vec![],
            query: "Tab. Napa 500 mg",
            reference: "Napa",
            threshold: 0.7,
            expected: ReconcileOutcome::Unmatched,
        },
        GoldenCase {
            id: "untrusted-only-unmatched",
            hits: vec![("https://randomblog.example/napa", "Napa 500mg price")],
            query: "Tab. Napa 500 mg",
            reference: "Napa",
            threshold: 0.7,
            expected: ReconcileOutcome::Unmatched,
        },
        GoldenCase {
            id: "higher-later-score-wins",
            // "Napasoxy" scores 0.75, "Napasofx" scores 0.875 vs "Napasoft"
            hits: vec![
                ("https://medex.com.bd/a", "Napasoxy 250mg"),
                ("https://arogga.com/b", "Napasofx 250mg"),
            ],
            query: "Napasoft 250 mg",
            reference: "Napasoft",
            threshold: 0.7,
            expected: ReconcileOutcome::Matched {
                name: "Napasofx".into(),
                score: 0.875,
            },
        },
        GoldenCase {
            id: "equal-score-keeps-first",
            hits: vec![
                ("https://medex.com.bd/a", "NAPA 500mg"),
                ("https://arogga.com/b", "Napa 500mg"),
            ],
            query: "Napa",
            reference: "Napa",
            threshold: 0.7,
            expected: ReconcileOutcome::Matched {
                name: "NAPA".into(),
                score: 1.0,
            },
        },
        GoldenCase {
            id: "empty-title-token-ignored",
            hits: vec![
                ("https://medex.com.bd/a", "- | -"),
                ("https://medex.com.bd/b", "Napa 500mg"),
            ],
            query: "Napa",
            reference: "Napa",
            threshold: 0.7,
            expected: ReconcileOutcome::Matched {
                name: "Napa".into(),
                score: 1.0,
            },
        },
    ]
}

#[test]
fn golden_reconciliation_cases() {
    for case in golden_cases() {
        let provider = FixedProvider {
            hits: case
                .hits
                .iter()
                .map(|(url, title)| SearchHit {
                    url: url.to_string(),
                    title: title.to_string(),
                })
                .collect(),
        };
        let reconciler = Reconciler::with_config(
            &provider,
            ReconcilerConfig {
                threshold: case.threshold,
                ..Default::default()
            },
        );

        let outcome = reconciler
            .reconcile(case.query, case.reference)
            .unwrap_or_else(|e| panic!("case {} failed: {e}", case.id));

        assert_eq!(outcome, case.expected, "case {}", case.id);
    }
}

#[test]
fn transport_failure_is_not_unmatched() {
    struct DownProvider;

    impl SearchProvider for DownProvider {
        fn search(
            &self,
            _query: &str,
            _max_results: u32,
            _region: Option<&str>,
        ) -> Result<Vec<SearchHit>, SearchError> {
            Err(SearchError::Status {
                status: 429,
                body: "quota exhausted".into(),
            })
        }
    }

    let reconciler = Reconciler::new(&DownProvider);
    let result = reconciler.reconcile("Napa", "Napa");

    // Provider failure must remain distinguishable from Unmatched
    assert!(result.is_err());
}
