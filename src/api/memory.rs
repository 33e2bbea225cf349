// src/api/memory.rs
// Direct surface onto the memory service. Unlike the turn pipeline, a
// failure here is the caller's business, so it maps to a 500 instead of
// degraded-mode continuation.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::error::{ApiResult, IntoApiError};
use crate::api::types::{ClearMemoriesResponse, MemorySearchRequest, MemorySearchResponse};
use crate::state::AppState;

pub async fn search_memories(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MemorySearchRequest>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let limit = request.limit.unwrap_or(state.config.recall_limit);

        let memories = state
            .memory
            .search(&request.query, &request.user_id, limit)
            .await
            .into_api_error("Failed to search memories")?;

        Ok(Json(MemorySearchResponse { memories }))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn clear_memories(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        state
            .memory
            .clear(&user_id)
            .await
            .into_api_error("Failed to clear memories")?;

        info!("Cleared all memories for owner {}", user_id);
        Ok(Json(ClearMemoriesResponse { success: true }))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}
