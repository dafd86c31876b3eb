//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use async_trait::async_trait;

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (casegen-llm). The pipeline holds
/// providers as `Arc<dyn LlmProvider<Error = _>>`, so tests can inject a fake
/// without any process-wide state.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send a prompt and return the text of the first candidate
    async fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Identifier of the model this provider talks to
    fn model_name(&self) -> &str;
}
