use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, speak, voices};
use crate::state::AppState;
use std::sync::Arc;

/// Create the API router
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/voices", get(voices::list_voices))
        .route("/speak", post(speak::speak_handler))
        .route("/session", get(api::session_status))
        .layer(TraceLayer::new_for_http())
}
