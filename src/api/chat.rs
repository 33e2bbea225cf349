// src/api/chat.rs

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::types::{ChatRequest, ChatResponse};
use crate::error::TurnError;
use crate::state::AppState;

pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        // Clients without a session get one minted here and returned, so the
        // next request can continue the conversation.
        let session_id = request
            .session_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        info!(
            "Chat turn for owner {} in session {}",
            request.user_id, session_id
        );

        let reply = state
            .orchestrator
            .handle_turn(&request.user_id, &session_id, &request.message)
            .await
            .map_err(|err| match err {
                TurnError::InvalidInput(reason) => ApiError::bad_request(reason),
            })?;

        Ok(Json(ChatResponse { response: reply, session_id }))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}
