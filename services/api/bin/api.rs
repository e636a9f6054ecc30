//! Main Entrypoint for the HealthBot API Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Initializing logging.
//! 3. Constructing the search and text-generation capability clients.
//! 4. Building the Axum router and applying middleware.
//! 5. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use async_openai::config::OpenAIConfig;
use healthbot_api::{config::Config, router::create_router, state::AppState};
use healthbot_core::capabilities::{SearchProvider, TextGenerator};
use healthbot_core::generation::OpenAiTextGenerator;
use healthbot_core::search::TavilySearchClient;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Received shutdown signal. Shutting down gracefully...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Initializing application state...");

    let openai_config = OpenAIConfig::new().with_api_key(config.openai_api_key.clone());
    let generator: Arc<dyn TextGenerator> = Arc::new(OpenAiTextGenerator::new(
        openai_config,
        config.chat_model.clone(),
    ));
    let search: Arc<dyn SearchProvider> =
        Arc::new(TavilySearchClient::new(config.tavily_api_key.clone()));

    let app_state = Arc::new(AppState {
        search,
        generator,
        config: Arc::new(config.clone()),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(app_state).layer(cors);

    info!(
        model = %config.chat_model,
        bind_address = %config.bind_address,
        "Service configured. Starting server..."
    );
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server has shut down.");
    Ok(())
}
