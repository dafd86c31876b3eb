//! Command implementations.

pub mod document;
pub mod serve;
pub mod story;

pub use self::document::execute_document;
pub use self::serve::execute_serve;
pub use self::story::execute_story;

use crate::error::Result;
use casegen_extractor::Pipeline;
use casegen_llm::GeminiProvider;
use casegen_server::config::ServerConfig;

/// Build a pipeline backed by the configured Gemini model.
pub fn build_pipeline(config: &ServerConfig) -> Result<Pipeline> {
    let provider = GeminiProvider::from_config(&config.gemini)?;
    Ok(Pipeline::with_provider(provider, config.pipeline.clone()))
}
