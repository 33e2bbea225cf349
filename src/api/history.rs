// src/api/history.rs
// Read-side of the conversation log; serves the external history viewer,
// never the turn pipeline itself.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::error::{ApiResult, IntoApiError};
use crate::api::types::{HistoryMessage, HistoryQuery, HistoryResponse, SessionsResponse};
use crate::state::AppState;

pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    Query(params): Query<HistoryQuery>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let limit = params
            .limit
            .unwrap_or(state.config.history_default_limit)
            .min(state.config.history_max_limit);

        let messages: Vec<HistoryMessage> = state
            .log
            .list(&session_id, limit)
            .await
            .into_api_error("Failed to fetch conversation history")?
            .into_iter()
            .map(|record| HistoryMessage {
                role: record.role,
                content: record.content,
                created_at: record.created_at,
            })
            .collect();

        Ok(Json(HistoryResponse { messages }))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn get_sessions(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let sessions = state
            .log
            .sessions(&user_id)
            .await
            .into_api_error("Failed to fetch sessions")?;

        Ok(Json(SessionsResponse { sessions }))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}
