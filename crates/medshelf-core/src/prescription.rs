//! Prescription report assembly.
//!
//! Bridges the extraction boundary and the reconciler: one reconciliation
//! per extracted medicine, in extraction order.

use crate::models::{ExtractedMedicine, PrescriptionReport, ReportItem};
use crate::reconcile::{ReconcileResult, Reconciler};

/// Reconcile every extracted medicine into an ordered report.
///
/// Each entry queries with the full mention and compares against the cleaned
/// name. A provider failure aborts the batch and propagates; the caller
/// decides whether to retry or surface it. Per-item "no confident match" is
/// a normal outcome and never aborts.
pub fn reconcile_prescription(
    reconciler: &Reconciler<'_>,
    medicines: Vec<ExtractedMedicine>,
) -> ReconcileResult<PrescriptionReport> {
    let mut items = Vec::with_capacity(medicines.len());

    for medicine in medicines {
        let outcome = reconciler.reconcile(&medicine.fullname, &medicine.name)?;
        items.push(ReportItem {
            outcome,
            strength: medicine.strength,
            dosage_type: medicine.dosage_type,
        });
    }

    Ok(PrescriptionReport { items })
}
