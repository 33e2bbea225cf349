// src/api/router.rs
// HTTP router composition for the REST API.

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{
    chat::chat_handler,
    handlers::health_handler,
    history::{get_messages, get_sessions},
    memory::{clear_memories, search_memories},
};
use crate::state::AppState;

pub fn api_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(health_handler))

        // Chat
        .route("/api/chat", post(chat_handler))

        // History (external viewer)
        .route("/api/messages/{session_id}", get(get_messages))
        .route("/api/sessions/{user_id}", get(get_sessions))

        // Memory maintenance
        .route("/api/memories/search", post(search_memories))
        .route("/api/memories/{user_id}", delete(clear_memories))

        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
