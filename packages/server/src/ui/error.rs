//! HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    domain::ValueObjectError, infrastructure::dto::http::ErrorResponse, usecase::GameError,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing or invalid credentials")]
    Unauthorized,

    #[error(transparent)]
    Game(#[from] GameError),
}

impl From<ValueObjectError> for ApiError {
    fn from(e: ValueObjectError) -> Self {
        Self::Game(e.into())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Game(GameError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Game(GameError::BadRequest(_)) => StatusCode::BAD_REQUEST,
            Self::Game(GameError::Forbidden(_)) => StatusCode::FORBIDDEN,
            Self::Game(GameError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Game(GameError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self);
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
