use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

use super::models::ChatMessage;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/chat", get(transcript))
        .route("/chat", post(send_message))
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

#[instrument(skip(state))]
async fn transcript(State(state): State<AppState>) -> Json<Vec<ChatMessage>> {
    Json(state.chat.messages())
}

#[instrument(skip(state, body))]
async fn send_message(
    State(state): State<AppState>,
    Json(body): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<ChatMessage>), AppError> {
    if body.text.trim().is_empty() {
        return Err(AppError::Validation("message text must not be empty".into()));
    }
    let message = state.chat.send(&body.text);
    Ok((StatusCode::CREATED, Json(message)))
}
