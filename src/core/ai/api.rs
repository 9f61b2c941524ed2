use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::client::{ChatClient, ChatError};

#[derive(Clone)]
pub struct ChatApiState {
    pub chat: Arc<ChatClient>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Serialize)]
struct ChatErrorBody {
    success: bool,
    reply: String,
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = match &self {
            ChatError::EmptyMessage => StatusCode::BAD_REQUEST,
            ChatError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            ChatError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ChatError::Network(err) => {
                tracing::error!(error = %err, "chat request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ChatErrorBody {
            success: false,
            reply: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Routes under `/api/ai`.
///
/// Not behind the session middleware; the assistant is reachable
/// app-wide, including from the login page.
pub fn chat_api_router(state: ChatApiState) -> Router {
    Router::new()
        .route("/api/ai/chat", post(chat_handler))
        .with_state(state)
}

async fn chat_handler(
    State(state): State<ChatApiState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ChatError> {
    let reply = state.chat.complete(&request.message).await?;
    Ok(Json(ChatReply { reply }))
}

// ============================================================================
// Tests
// ============================================================================
