// Model listing and creation HTTP routes

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::ModelService;

/// App state for model routes
#[derive(Clone)]
pub struct AppState {
    pub models: Arc<ModelService>,
}

/// Create model routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/models", get(list_models))
        .route("/create_model", post(create_model))
        .with_state(state)
}

/// Name and description of one model, predefined or custom
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModelSummary {
    pub name: String,
    pub description: String,
}

/// Response for GET /models; both groups are always present
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ModelsResponse {
    pub predefined_models: Vec<ModelSummary>,
    pub custom_models: Vec<ModelSummary>,
}

/// Request to create a custom model
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateModelRequest {
    /// Display name for the new model
    #[schema(example = "Chef")]
    pub name: String,
    /// Capability description
    #[schema(example = "Cooking advice")]
    pub description: String,
}

/// Confirmation returned after creating a custom model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateModelResponse {
    pub message: String,
}

/// GET /models - List predefined and custom models
#[utoipa::path(
    get,
    path = "/models",
    responses(
        (status = 200, description = "Predefined and custom models", body = ModelsResponse)
    ),
    tag = "models"
)]
pub async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    let predefined_models = state
        .models
        .predefined()
        .into_iter()
        .map(|agent| ModelSummary {
            name: agent.name.clone(),
            description: agent.description.clone(),
        })
        .collect();
    let custom_models = state
        .models
        .custom()
        .await
        .into_iter()
        .map(|record| ModelSummary {
            name: record.name,
            description: record.description,
        })
        .collect();

    Json(ModelsResponse {
        predefined_models,
        custom_models,
    })
}

/// POST /create_model - Create a new custom model
#[utoipa::path(
    post,
    path = "/create_model",
    request_body = CreateModelRequest,
    responses(
        (status = 200, description = "Custom model created", body = CreateModelResponse),
        (status = 500, description = "Failed to persist the model")
    ),
    tag = "models"
)]
pub async fn create_model(
    State(state): State<AppState>,
    Json(req): Json<CreateModelRequest>,
) -> Result<Json<CreateModelResponse>, ApiError> {
    let record = state
        .models
        .create(req.name, req.description)
        .await
        .map_err(|e| {
            tracing::error!("failed to create custom model: {}", e);
            ApiError::Internal(e.to_string())
        })?;

    Ok(Json(CreateModelResponse {
        message: format!("Custom model '{}' created successfully!", record.name),
    }))
}
