//! Prescription upload endpoint.
//!
//! Accepts a photographed prescription, runs extraction and name
//! reconciliation, and answers with the per-medicine map. The report's text
//! rendering is stored as chat context for the session.

use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::json;

use medshelf_core::models::{PrescriptionReport, NO_MATCH_SENTINEL};
use medshelf_core::prescription::reconcile_prescription;
use medshelf_core::reconcile::Reconciler;

use crate::error::ApiError;
use crate::state::AppState;

/// `POST /explain-image` — multipart image upload.
pub async fn explain_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {e}")))?
        .ok_or_else(|| ApiError::BadRequest("no file uploaded".into()))?;

    let image = field
        .bytes()
        .await
        .map_err(|e| ApiError::BadRequest(format!("failed to read upload: {e}")))?
        .to_vec();

    if image.is_empty() {
        return Err(ApiError::BadRequest("uploaded file is empty".into()));
    }

    let assistant = state.assistant.clone();
    let search = state.search.clone();
    let config = state.reconciler_config.clone();

    // Extraction and reconciliation are blocking provider calls.
    let report = tokio::task::spawn_blocking(move || -> Result<PrescriptionReport, ApiError> {
        let medicines = assistant.extract_medicines(&image)?;
        tracing::info!(count = medicines.len(), "extracted medicines from prescription");

        let reconciler = Reconciler::with_config(&*search, config);
        Ok(reconcile_prescription(&reconciler, medicines)?)
    })
    .await??;

    state.set_chat_context(report.to_context_text(NO_MATCH_SENTINEL))?;

    Ok(Json(report_payload(&report)))
}

/// Flatten the report into the `medicine_{n}` map. The unmatched sentinel
/// string exists only here, at the serialization boundary.
fn report_payload(report: &PrescriptionReport) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for (i, item) in report.items.iter().enumerate() {
        map.insert(
            format!("medicine_{}", i + 1),
            json!({
                "name": item.outcome.name().unwrap_or(NO_MATCH_SENTINEL),
                "strength": item.strength,
                "dosage_type": item.dosage_type,
            }),
        );
    }
    serde_json::Value::Object(map)
}
