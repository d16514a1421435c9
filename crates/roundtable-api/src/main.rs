// Roundtable API server
//
// Thin control layer over the conversation engine: a registry of predefined
// personas, a file-backed store of user-created ones, two chat-initiation
// routes, and a background sweeper expiring stale custom models.

mod chat;
mod config;
mod error;
mod models;
mod services;

use anyhow::{Context, Result};
use axum::{routing::get, Json, Router};
use roundtable_core::{AgentRegistry, ConversationEngine, ModelConfig, TurnRecord};
use roundtable_engine::ChatEngine;
use roundtable_store::{CustomAgentStore, Sweeper, SweeperConfig};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::ApiConfig;
use services::{ChatService, ModelService};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        models::list_models,
        models::create_model,
        chat::single_chat,
        chat::group_chat,
    ),
    components(
        schemas(
            models::ModelSummary,
            models::ModelsResponse,
            models::CreateModelRequest,
            models::CreateModelResponse,
            chat::SingleChatRequest,
            chat::SingleChatResponse,
            chat::GroupChatRequest,
            chat::GroupChatResponse,
            TurnRecord,
        )
    ),
    tags(
        (name = "models", description = "Model listing and creation"),
        (name = "chat", description = "Single- and multi-agent chat initiation")
    ),
    info(
        title = "Roundtable API",
        description = "API for creating agent personas and running single- or multi-agent chats",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roundtable_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("roundtable-api starting...");

    let config = ApiConfig::from_env();
    tracing::info!(
        model_config = %config.model_config_path,
        custom_models = %config.custom_models_path,
        "configuration loaded"
    );

    let model_config = Arc::new(
        ModelConfig::from_file(&config.model_config_path)
            .context("Failed to load model endpoint config")?,
    );
    let registry = AgentRegistry::with_predefined(model_config.clone());
    let store = Arc::new(CustomAgentStore::new(&config.custom_models_path));

    // Expire stale custom models in the background for the process lifetime.
    Sweeper::spawn(
        store.clone(),
        SweeperConfig {
            retention: config.retention,
            interval: config.sweep_interval,
        },
    );

    let engine: Arc<dyn ConversationEngine> = Arc::new(ChatEngine::new());
    let model_service = Arc::new(ModelService::new(registry, store, model_config));
    let chat_service = Arc::new(ChatService::new(engine));

    let app = Router::new()
        .route("/health", get(health))
        .merge(models::routes(models::AppState {
            models: model_service.clone(),
        }))
        .merge(chat::routes(chat::AppState {
            models: model_service,
            chat: chat_service,
        }))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // The UI may be served from anywhere; the API carries no credentials.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
