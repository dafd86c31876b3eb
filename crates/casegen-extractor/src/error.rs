//! Error types for the generation pipeline

use casegen_domain::DocumentFormat;
use casegen_llm::LlmError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while turning a story or document into test cases
///
/// Every component failure aborts the request; nothing here is recovered
/// locally.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// File extension is not one of the supported document formats
    #[error("Unsupported file format '{0}'. Only {list} are allowed.", list = DocumentFormat::supported_list())]
    UnsupportedFormat(String),

    /// Document could not be read or decoded
    #[error("Failed to read document {}: {reason}", .path.display())]
    DocumentRead {
        /// Path of the document
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// Plain text document is not valid UTF-8
    #[error("Document {} is not valid UTF-8", .0.display())]
    InvalidEncoding(PathBuf),

    /// Extraction succeeded but produced no text
    #[error("Document {} contains no extractable text", .0.display())]
    EmptyDocument(PathBuf),

    /// User story is blank
    #[error("User story is empty")]
    EmptyStory,

    /// Input exceeds the configured maximum length
    #[error("Input too long: {0} chars (max: {1})")]
    InputTooLong(usize, usize),

    /// Transport, authentication or protocol failure reaching the LLM
    #[error("AI provider error: {0}")]
    AiProvider(#[source] LlmError),

    /// Provider returned no candidate or no text part
    #[error("No content returned from the AI provider")]
    EmptyAiResponse,

    /// Response text is blank once code fences are stripped
    #[error("No valid content in the AI response")]
    EmptyAiContent,

    /// Response text is not valid JSON
    #[error("AI response is not valid JSON: {reason}")]
    MalformedAiResponse {
        /// Unmodified provider text, kept for diagnostics
        raw: String,
        /// Parser error message
        reason: String,
    },

    /// JSON parsed but does not have the requested shape
    #[error("AI response does not match the expected schema: {0}")]
    SchemaViolation(String),

    /// Provider round trip exceeded the configured deadline
    #[error("AI provider did not answer within {0}s")]
    Timeout(u64),

    /// Pipeline or provider is misconfigured
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl GenerationError {
    /// Stable machine-readable tag for the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::UnsupportedFormat(_) => "unsupported_format",
            GenerationError::DocumentRead { .. } => "document_read",
            GenerationError::InvalidEncoding(_) => "invalid_encoding",
            GenerationError::EmptyDocument(_) => "empty_document",
            GenerationError::EmptyStory => "empty_story",
            GenerationError::InputTooLong(_, _) => "input_too_long",
            GenerationError::AiProvider(_) => "ai_provider_error",
            GenerationError::EmptyAiResponse => "empty_ai_response",
            GenerationError::EmptyAiContent => "empty_ai_content",
            GenerationError::MalformedAiResponse { .. } => "malformed_ai_response",
            GenerationError::SchemaViolation(_) => "schema_violation",
            GenerationError::Timeout(_) => "timeout",
            GenerationError::Configuration(_) => "configuration_error",
        }
    }
}

impl From<LlmError> for GenerationError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::EmptyResponse => GenerationError::EmptyAiResponse,
            LlmError::Configuration(msg) => GenerationError::Configuration(msg),
            other => GenerationError::AiProvider(other),
        }
    }
}
