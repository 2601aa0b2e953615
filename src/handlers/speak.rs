use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use tracing::info;

use crate::core::tts::{PollyEngine, check_text};
use crate::errors::app_error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /speak`
#[derive(Debug, Clone, Deserialize)]
pub struct SpeakRequest {
    /// Text to synthesize, sent to the provider unmodified
    pub text: String,
    /// Voice id from `GET /voices`
    pub voice_id: String,
    /// Engine override; the configured default applies when omitted
    #[serde(default)]
    pub engine: Option<PollyEngine>,
}

/// Synthesize text and return the audio as a downloadable attachment.
///
/// The body is exactly the bytes the provider produced.
pub async fn speak_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<SpeakRequest>,
) -> AppResult<Response> {
    let engine = request.engine.unwrap_or(state.config.default_engine);

    // Text problems are reported before anything touches the provider.
    check_text(&request.text, engine)?;
    if request.voice_id.trim().is_empty() {
        return Err(AppError::BadRequest("voice_id is required".to_string()));
    }

    // Voices are resolved against the catalog, so it must exist first.
    state.client.catalog(&state.config.voice_languages).await?;

    let session = state.session_for(&headers);

    let audio = session
        .synthesize(request.text, &request.voice_id, engine)
        .await?;

    info!(
        session = session.id(),
        voice = %request.voice_id,
        engine = %engine,
        audio_bytes = audio.len(),
        "Speech synthesized"
    );

    let mut response_headers = HeaderMap::new();
    let content_type = HeaderValue::from_str(&audio.mime_type)
        .unwrap_or_else(|_| HeaderValue::from_static(audio.format.mime_type()));
    response_headers.insert(header::CONTENT_TYPE, content_type);
    if let Ok(len) = HeaderValue::from_str(&audio.len().to_string()) {
        response_headers.insert(header::CONTENT_LENGTH, len);
    }
    if let Ok(disposition) = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        audio.download_file_name()
    )) {
        response_headers.insert(header::CONTENT_DISPOSITION, disposition);
    }

    Ok((StatusCode::OK, response_headers, audio.bytes).into_response())
}
