// Lexdraft API - Local Development Server
// Entry point for running the API locally during development

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use lexdraft_api::{create_app, AppState};
use lexdraft_common::Config;
use lexdraft_conversations::ConversationStore;
use lexdraft_llm::{GeminiService, LlmConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    let config = Config::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    // Initialize tracing for structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log)),
        )
        .pretty()
        .init();

    info!("Starting Lexdraft API local development server");
    info!(model = %config.gemini_model, "Configuration loaded successfully");

    // Wire up the Gemini gateway and in-memory conversation store
    let llm = GeminiService::new(LlmConfig {
        api_key: config.gemini_api_key.clone(),
        default_model: config.gemini_model.clone(),
        base_url: config.gemini_base_url.clone(),
    });
    let state = AppState::new(Arc::new(ConversationStore::new()), Arc::new(llm));

    // Create the application router
    let app = create_app(state);

    // Add development-specific middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config.cors_origins))
            .into_inner(),
    );

    // Create socket address from config
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("Server starting on http://{}", addr);
    info!("Health check available at http://{}/health", addr);

    // Create TCP listener
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind {}: {}", addr, e);
        e
    })?;

    // Run the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Build the CORS layer from the configured origin list
fn cors_layer(origins: &str) -> CorsLayer {
    if origins.trim() == "*" {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
