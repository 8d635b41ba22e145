//! Chat assistant endpoint.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatMessage {
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// `POST /chatbot/message` — one chat turn, grounded in the stored
/// prescription context when a prescription has been analyzed.
pub async fn message(
    State(state): State<AppState>,
    Json(chat): Json<ChatMessage>,
) -> Result<Json<ChatResponse>, ApiError> {
    if chat.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".into()));
    }

    let context = state.get_chat_context()?;
    let assistant = state.assistant.clone();

    let response = tokio::task::spawn_blocking(move || {
        assistant.chat(context.as_deref(), &chat.message)
    })
    .await?
    .map_err(ApiError::from)?;

    Ok(Json(ChatResponse { response }))
}
