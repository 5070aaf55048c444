//! Route configuration and setup

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use helpdesk_core::Config;

const API_PREFIX: &str = "/api/v0";

// Headroom over the per-file cap for multipart framing and the text fields;
// oversized files inside the limit are rejected with the per-file message
// instead of an opaque 413.
const BODY_LIMIT_SLACK_BYTES: usize = 4 * 1024 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    let body_limit = config
        .max_attachment_size_bytes
        .saturating_mul(4)
        .saturating_add(BODY_LIMIT_SLACK_BYTES);

    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .route(
            &format!("{}/tickets", API_PREFIX),
            post(handlers::submit_ticket::submit_ticket),
        )
        .route(
            &format!("{}/tickets/{{id}}", API_PREFIX),
            get(handlers::ticket_get::get_ticket),
        )
        .route(
            &format!("{}/email/webhook", API_PREFIX),
            post(handlers::email_webhook::email_webhook),
        )
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit()))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Server-level concurrency limit to protect against resource exhaustion
/// under extreme load.
fn http_concurrency_limit() -> usize {
    std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000)
        .max(1)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins.iter().map(|o| o.parse()).collect();

        CorsLayer::new()
            .allow_origin(origins.unwrap_or_default())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
