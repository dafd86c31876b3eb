//! Casegen Server
//!
//! HTTP front end for the test case pipeline: `POST /testcases` for a single
//! user story, `POST /upload` for a document, `GET /health` for liveness.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod upload;

use axum::{extract::DefaultBodyLimit, http::Method, Router as AxumRouter};
use casegen_extractor::Pipeline;
use casegen_llm::{GeminiProvider, LlmError};
use config::ServerConfig;
use handlers::{create_router, AppState};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use upload::UploadStore;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The LLM provider could not be set up
    #[error("Provider setup failed: {0}")]
    Provider(#[from] LlmError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Wrap the routes with tracing, CORS and the body size limit
pub fn build_app(state: AppState, config: &ServerConfig) -> AxumRouter {
    let mut app = create_router(state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    if config.cors_permissive {
        // No credentials: a wildcard origin cannot be combined with them
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Start the HTTP server
///
/// Builds the Gemini provider first so a missing API key stops startup
/// instead of failing the first request. Tracing must already be initialized.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    config.validate()?;

    info!("Starting casegen server");
    info!("Bind address: {}", config.bind_addr());
    info!("Model: {}", config.gemini.model);
    info!("Upload directory: {}", config.upload_dir.display());

    let provider = GeminiProvider::from_config(&config.gemini)?;
    let pipeline = Pipeline::with_provider(provider, config.pipeline.clone());

    let state = AppState {
        pipeline,
        uploads: UploadStore::new(config.upload_dir.clone()),
    };

    let app = build_app(state, &config);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
