//! Utility endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    infrastructure::dto::http::WordsResponse,
    ui::{auth::AuthUser, error::ApiError, state::AppState},
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Random batch of candidate words
pub async fn get_words(
    State(state): State<Arc<AppState>>,
    AuthUser(_): AuthUser,
    Path(count): Path<usize>,
) -> Result<Json<WordsResponse>, ApiError> {
    let words = state.get_words_usecase.execute(count).await?;
    Ok(Json(WordsResponse { words }))
}
