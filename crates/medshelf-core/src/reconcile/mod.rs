//! Name reconciliation against live search evidence.
//!
//! Pipeline: search provider → trusted-domain filter → candidate extraction
//! → similarity scoring → threshold selection.

mod candidate;
mod filter;
mod similarity;

pub use candidate::*;
pub use filter::*;
pub use similarity::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ReconcileOutcome;

/// Regional pharmacy/e-commerce domains trusted for medicine listings.
pub const DEFAULT_ALLOWED_DOMAINS: &[&str] = &[
    "medex",
    "arogga",
    "medeasy",
    "epharma",
    "othoba",
    "inceptapharma",
    "osudpotro",
    "lazzpharma",
    "chaldal",
    "medsbd",
];

/// Default minimum similarity for a confident match.
pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// Default bound on raw results requested from the provider.
pub const DEFAULT_MAX_RESULTS: u32 = 20;

/// One raw result from the search provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub url: String,
    pub title: String,
}

/// Search provider failures, as seen by the reconciler.
///
/// Never retried here; the caller owns retry/backoff policy.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("cannot connect to search provider: {0}")]
    Connect(String),

    #[error("search request timed out: {0}")]
    Timeout(String),

    #[error("search provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed search response: {0}")]
    Parse(String),
}

/// Reconciliation errors. "No confident match" is NOT an error — it is a
/// successful [`ReconcileOutcome::Unmatched`].
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("search provider failure: {0}")]
    Transport(#[from] SearchError),
}

pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// External search collaborator.
///
/// Synchronous by design: callable from a worker thread or wrapped in
/// `spawn_blocking` by an async host. Implementations own their timeout
/// and cancellation behavior.
pub trait SearchProvider {
    fn search(
        &self,
        query: &str,
        max_results: u32,
        region: Option<&str>,
    ) -> Result<Vec<SearchHit>, SearchError>;
}

/// Reconciler configuration. Explicit values, no module-level state, so
/// tests and callers can vary them per instance.
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    pub allowed_domains: Vec<String>,
    pub threshold: f64,
    pub max_results: u32,
    pub region: Option<String>,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            allowed_domains: DEFAULT_ALLOWED_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            threshold: DEFAULT_THRESHOLD,
            max_results: DEFAULT_MAX_RESULTS,
            region: Some("Bangladesh".to_string()),
        }
    }
}

/// Reconciles a noisy extracted medicine name against search evidence.
pub struct Reconciler<'a> {
    provider: &'a dyn SearchProvider,
    config: ReconcilerConfig,
}

impl<'a> Reconciler<'a> {
    /// Create a reconciler with default configuration.
    pub fn new(provider: &'a dyn SearchProvider) -> Self {
        Self::with_config(provider, ReconcilerConfig::default())
    }

    /// Create a reconciler with explicit configuration.
    pub fn with_config(provider: &'a dyn SearchProvider, config: ReconcilerConfig) -> Self {
        Self { provider, config }
    }

    /// The active configuration.
    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Reconcile `reference_name` against search results for `query`.
    ///
    /// Provider failure propagates as [`ReconcileError::Transport`]; it is
    /// never collapsed into `Unmatched`. An empty or fully filtered result
    /// list yields `Unmatched` deterministically.
    pub fn reconcile(&self, query: &str, reference_name: &str) -> ReconcileResult<ReconcileOutcome> {
        let raw = self
            .provider
            .search(query, self.config.max_results, self.config.region.as_deref())?;
        let raw_count = raw.len();

        let trusted = filter_trusted(raw, &self.config.allowed_domains);
        tracing::debug!(
            query,
            reference_name,
            raw = raw_count,
            trusted = trusted.len(),
            "scoring filtered search results"
        );

        let outcome = select_best(
            reference_name,
            trusted.iter().map(|hit| primary_token(&hit.title)),
            self.config.threshold,
        );

        match &outcome {
            ReconcileOutcome::Matched { name, score } => {
                tracing::debug!(matched = %name, score, "reconciliation matched");
            }
            ReconcileOutcome::Unmatched => {
                tracing::debug!(reference_name, "no candidate cleared the threshold");
            }
        }
        Ok(outcome)
    }
}

/// Pick the best-scoring candidate at or above the threshold.
///
/// A candidate replaces the running best only when its score is >= threshold
/// AND strictly greater than the current best; an equal-scoring later
/// candidate never displaces an earlier one. Empty candidates are still
/// scored (0.0 against any non-empty reference) and so never qualify unless
/// the threshold is 0.
fn select_best(
    reference_name: &str,
    candidates: impl Iterator<Item = String>,
    threshold: f64,
) -> ReconcileOutcome {
    let mut best: Option<(String, f64)> = None;

    for candidate in candidates {
        let score = similarity(reference_name, &candidate);
        let current_best = best.as_ref().map(|(_, s)| *s).unwrap_or(0.0);
        if score >= threshold && score > current_best {
            best = Some((candidate, score));
        }
    }

    match best {
        Some((name, score)) => ReconcileOutcome::Matched { name, score },
        None => ReconcileOutcome::Unmatched,
    }
}
