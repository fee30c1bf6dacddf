//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::{self, ConvertRequest};
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::ConverterService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub converter: ConverterService,
    pub config: Arc<AppConfig>,
}

/// Create application state from a loaded configuration.
pub fn create_app_state(config: AppConfig) -> AppState {
    let converter = ConverterService::from_config(&config);

    AppState {
        converter,
        config: Arc::new(config),
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
/// Request bodies above `server.max_body_bytes` are rejected with 413.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_bytes;

    Router::new()
        .route("/api/convert", post(handle_convert))
        .route("/api/palette", post(api::handle_palette))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}

// Wrapper handler to extract the converter for the underlying API handler

async fn handle_convert(
    State(state): State<AppState>,
    request: Json<ConvertRequest>,
) -> Result<impl IntoResponse, ApiError> {
    api::handle_convert(State(state.converter), request).await
}
