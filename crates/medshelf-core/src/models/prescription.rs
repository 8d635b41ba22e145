//! Prescription extraction and reconciliation models.

use serde::{Deserialize, Serialize};

/// Default value for extraction fields the model could not read.
pub const UNKNOWN_FIELD: &str = "N/A";

/// Sentinel string emitted at the serialization boundary for an
/// [`ReconcileOutcome::Unmatched`] entry. Internal code passes the enum
/// around; only outgoing payloads flatten it to this text.
pub const NO_MATCH_SENTINEL: &str = "Sorry can't detect the correct name";

/// One medicine extracted from a prescription image.
///
/// The extraction provider emits parallel lists; they are zipped into these
/// records once at the boundary so index alignment cannot drift afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedMedicine {
    /// Full mention as written, used as the search query (e.g., "Tab. Napa 500 mg")
    pub fullname: String,
    /// Cleaned brand/generic name, used as the reconciliation reference
    pub name: String,
    /// Dosage form (tablet, capsule, syrup, ...), "N/A" when unreadable
    pub dosage_type: String,
    /// Strength (e.g., "500 mg"), "N/A" when unreadable
    pub strength: String,
}

impl ExtractedMedicine {
    /// Zip the provider's parallel lists into records.
    ///
    /// `name` drives the record count. Missing trailing `dosage_type` and
    /// `strength` entries are filled with "N/A"; a missing `fullname` falls
    /// back to the name itself. Surplus trailing entries are dropped.
    pub fn from_parallel_lists(
        fullname: Vec<String>,
        name: Vec<String>,
        dosage_type: Vec<String>,
        strength: Vec<String>,
    ) -> Vec<ExtractedMedicine> {
        name.into_iter()
            .enumerate()
            .map(|(i, n)| ExtractedMedicine {
                fullname: fullname.get(i).cloned().unwrap_or_else(|| n.clone()),
                name: n,
                dosage_type: dosage_type
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_FIELD.to_string()),
                strength: strength
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_FIELD.to_string()),
            })
            .collect()
    }
}

/// Result of reconciling one extracted name against search evidence.
///
/// A sentinel enum rather than a magic string, so callers cannot confuse a
/// real medicine name with "nothing cleared the threshold".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReconcileOutcome {
    /// Best candidate at or above the similarity threshold.
    Matched { name: String, score: f64 },
    /// Scoring completed but no candidate cleared the threshold.
    Unmatched,
}

impl ReconcileOutcome {
    /// The matched name, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            ReconcileOutcome::Matched { name, .. } => Some(name),
            ReconcileOutcome::Unmatched => None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, ReconcileOutcome::Matched { .. })
    }
}

/// A reconciled prescription line: outcome plus the extraction's
/// strength/dosage carried through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportItem {
    pub outcome: ReconcileOutcome,
    pub strength: String,
    pub dosage_type: String,
}

/// Ordered reconciliation report for one prescription image.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PrescriptionReport {
    pub items: Vec<ReportItem>,
}

impl PrescriptionReport {
    /// Plain-text rendering used as chat context.
    ///
    /// One line per medicine, in extraction order.
    pub fn to_context_text(&self, sentinel: &str) -> String {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                format!(
                    "medicine_{}: name={}, strength={}, dosage_type={}",
                    i + 1,
                    item.outcome.name().unwrap_or(sentinel),
                    item.strength,
                    item.dosage_type,
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
