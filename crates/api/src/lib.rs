//! HTTP API handlers and local server for Lexdraft

pub mod dispatcher;
pub mod handlers;
pub mod prompt;
pub mod routes;
pub mod sse;
pub mod state;

use axum::Router;

pub use sse::SseFrame;
pub use state::AppState;

/// Create the main application router with all routes
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Lexdraft API v0.1.0" }),
        )
        .merge(routes::create_routes())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
