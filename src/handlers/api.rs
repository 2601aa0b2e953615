use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, response::Json};
use serde::Serialize;

use crate::core::tts::SynthesisState;
use crate::state::{AppState, session_id};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Liveness check. Does not touch the provider.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "OK" })
}

#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub id: String,
    pub busy: bool,
    pub last_state: SynthesisState,
}

/// Report whether the caller's session has a synthesis pending.
///
/// Sessions are evicted once idle, so an unknown id reads as idle and the
/// lookup never registers a new one.
pub async fn session_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<SessionStatus> {
    let id = session_id(&headers);
    let status = state
        .inspect_session(id, |session| SessionStatus {
            id: session.id().to_string(),
            busy: session.is_busy(),
            last_state: session.last_state(),
        })
        .unwrap_or_else(|| SessionStatus {
            id: id.to_string(),
            busy: false,
            last_state: SynthesisState::Idle,
        });
    Json(status)
}
