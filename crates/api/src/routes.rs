//! Route definitions for the Lexdraft API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{chat, conversations},
    state::AppState,
};

/// Create chat routes
pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/chat", post(chat::chat))
}

/// Create conversation management routes
pub fn conversation_routes() -> Router<AppState> {
    Router::new().route(
        "/conversations/{id}",
        get(conversations::get_conversation).delete(conversations::delete_conversation),
    )
}

/// Create all API routes
pub fn create_routes() -> Router<AppState> {
    Router::new().merge(chat_routes()).merge(conversation_routes())
}
