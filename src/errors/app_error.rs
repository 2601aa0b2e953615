//! HTTP-facing error type.
//!
//! Handlers return `AppResult<T>`; every core error is rendered as a JSON body
//! `{ "error": <kind>, "message": <text> }` with a status code chosen by kind.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::{ProviderError, SynthesisError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Provider(err) => match err {
                ProviderError::AuthFailure => StatusCode::BAD_GATEWAY,
                ProviderError::Unreachable => StatusCode::SERVICE_UNAVAILABLE,
                ProviderError::Unexpected(_) => StatusCode::BAD_GATEWAY,
            },
            Self::Synthesis(err) => match err {
                SynthesisError::EmptyInput
                | SynthesisError::TextTooLong { .. }
                | SynthesisError::InvalidVoice(_) => StatusCode::BAD_REQUEST,
                SynthesisError::InProgress => StatusCode::CONFLICT,
                SynthesisError::AuthFailure => StatusCode::BAD_GATEWAY,
                SynthesisError::Unreachable => StatusCode::SERVICE_UNAVAILABLE,
                SynthesisError::Unexpected(_) => StatusCode::BAD_GATEWAY,
            },
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::Provider(err) => err.kind(),
            Self::Synthesis(err) => err.kind(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(status = %status, error = %self, "Request failed");
        }
        let body = ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
