//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] casegen_server::config::ConfigError),

    /// LLM provider could not be set up
    #[error("Provider error: {0}")]
    Provider(#[from] casegen_llm::LlmError),

    /// Pipeline failure
    #[error("{0}")]
    Generation(#[from] casegen_extractor::GenerationError),

    /// HTTP server failure
    #[error("{0}")]
    Server(#[from] casegen_server::ServerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
