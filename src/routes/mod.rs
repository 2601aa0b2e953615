//! Router assembly.

pub mod api;

use std::sync::Arc;

use axum::{Router, routing::get};
use http::{HeaderName, HeaderValue, Method, header::CONTENT_TYPE};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;

use crate::handlers;
use crate::state::{AppState, SESSION_HEADER};

/// Build the complete application: health check, API routes, CORS and
/// security headers.
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors_layer = cors_layer(state.config.cors_allowed_origins.as_deref());

    // Security headers
    let security_headers = tower::ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            http::header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    Router::new()
        .route("/", get(handlers::api::health_check))
        .merge(api::create_api_router())
        .with_state(state)
        .layer(cors_layer)
        .layer(security_headers)
}

/// CORS policy for `origins`: `*` allows any origin, a comma separated list
/// allows those origins, `None` keeps the browser default of same-origin only.
pub fn cors_layer(origins: Option<&str>) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(SESSION_HEADER)])
        .expose_headers([http::header::CONTENT_DISPOSITION]);

    match origins {
        Some("*") => base.allow_origin(Any),
        Some(list) => {
            let origins: Vec<HeaderValue> = list
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            base.allow_origin(origins)
        }
        None => {
            info!(
                "CORS not configured, defaulting to same-origin only. \
                 Set CORS_ALLOWED_ORIGINS to enable cross-origin access."
            );
            base
        }
    }
}
