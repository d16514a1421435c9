// Chat initiation HTTP routes
//
// Both routes resolve model names against the registry first, then the
// custom store, and block until the engine finishes the conversation.

use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use roundtable_core::TurnRecord;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::{ChatService, ModelService};

/// App state for chat routes
#[derive(Clone)]
pub struct AppState {
    pub models: Arc<ModelService>,
    pub chat: Arc<ChatService>,
}

/// Create chat routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/single_chat/{model_name}", post(single_chat))
        .route("/group_chat", post(group_chat))
        .with_state(state)
}

/// Request body for a single chat
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SingleChatRequest {
    /// The message seeding the conversation
    #[schema(example = "How do I sleep better?")]
    pub message: String,
}

/// Single-chat response: just the first substantive reply
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SingleChatResponse {
    pub responses: String,
}

/// Request body for a group chat
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupChatRequest {
    /// Models to seat at the table; unresolved names are dropped
    pub model_names: Vec<String>,
    /// The message seeding the conversation
    pub message: String,
}

/// Group-chat response: the full transcript
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GroupChatResponse {
    pub responses: Vec<TurnRecord>,
}

/// POST /single_chat/{model_name} - Run a single-agent conversation
#[utoipa::path(
    post,
    path = "/single_chat/{model_name}",
    params(
        ("model_name" = String, Path, description = "Model name, case-insensitive")
    ),
    request_body = SingleChatRequest,
    responses(
        (status = 200, description = "First reply of the conversation", body = SingleChatResponse),
        (status = 404, description = "Model not found"),
        (status = 500, description = "Conversation failed")
    ),
    tag = "chat"
)]
pub async fn single_chat(
    State(state): State<AppState>,
    Path(model_name): Path<String>,
    Json(req): Json<SingleChatRequest>,
) -> Result<Json<SingleChatResponse>, ApiError> {
    let agent = state
        .models
        .resolve(&model_name)
        .await
        .ok_or(ApiError::ModelNotFound)?;

    let transcript = state
        .chat
        .single_chat(agent, req.message)
        .await
        .map_err(|e| {
            tracing::error!("single chat failed: {}", e);
            ApiError::Internal(e.to_string())
        })?;

    // Index 0 echoes the seed message; index 1 is the first substantive reply.
    let answer = transcript
        .get(1)
        .ok_or_else(|| ApiError::Internal("conversation produced no reply".to_string()))?;

    Ok(Json(SingleChatResponse {
        responses: answer.content.clone(),
    }))
}

/// POST /group_chat - Run a multi-agent round-table conversation
#[utoipa::path(
    post,
    path = "/group_chat",
    request_body = GroupChatRequest,
    responses(
        (status = 200, description = "Full conversation transcript", body = GroupChatResponse),
        (status = 400, description = "Fewer than two valid models"),
        (status = 500, description = "Conversation failed")
    ),
    tag = "chat"
)]
pub async fn group_chat(
    State(state): State<AppState>,
    Json(req): Json<GroupChatRequest>,
) -> Result<Json<GroupChatResponse>, ApiError> {
    let mut agents = Vec::new();
    for name in &req.model_names {
        match state.models.resolve(name).await {
            Some(agent) => agents.push(agent),
            None => tracing::debug!(model = %name, "dropping unresolved model from group chat"),
        }
    }

    if agents.len() < 2 {
        return Err(ApiError::Validation(
            "You need to select at least two valid models for a group chat".to_string(),
        ));
    }

    let transcript = state
        .chat
        .group_chat(agents, req.message)
        .await
        .map_err(|e| {
            tracing::error!("group chat failed: {}", e);
            ApiError::Internal(e.to_string())
        })?;

    Ok(Json(GroupChatResponse {
        responses: transcript,
    }))
}
