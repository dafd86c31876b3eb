//! Core Pipeline implementation

use crate::config::PipelineConfig;
use crate::document;
use crate::error::GenerationError;
use crate::parser::{decode_stories, decode_test_cases, normalize};
use crate::prompt::{build_extraction_prompt, build_story_prompt};
use casegen_domain::source::extension_of;
use casegen_domain::{GeneratedOutput, LlmProvider, SourceInput, StoryWithTestCases, TestCase};
use casegen_llm::LlmError;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, instrument};

/// Shared handle to the text generation backend
pub type SharedProvider = Arc<dyn LlmProvider<Error = LlmError>>;

/// The Pipeline turns a user story or a document into test cases
///
/// Stateless between calls: one `Pipeline` can serve any number of
/// concurrent requests. The first failing step aborts the request.
#[derive(Clone)]
pub struct Pipeline {
    llm_provider: SharedProvider,
    config: PipelineConfig,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("model", &self.llm_provider.model_name())
            .field("config", &self.config)
            .finish()
    }
}

impl Pipeline {
    /// Create a new Pipeline around an already shared provider
    pub fn new(llm_provider: SharedProvider, config: PipelineConfig) -> Self {
        Self {
            llm_provider,
            config,
        }
    }

    /// Create a new Pipeline, taking ownership of the provider
    pub fn with_provider<L>(llm_provider: L, config: PipelineConfig) -> Self
    where
        L: LlmProvider<Error = LlmError> + 'static,
    {
        Self::new(Arc::new(llm_provider), config)
    }

    /// Model identifier of the underlying provider
    pub fn model_name(&self) -> &str {
        self.llm_provider.model_name()
    }

    /// Pipeline settings
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run whichever path the input selects
    pub async fn run(&self, input: SourceInput) -> Result<GeneratedOutput, GenerationError> {
        match input {
            SourceInput::UserStory(story) => self
                .generate_test_cases(&story)
                .await
                .map(GeneratedOutput::TestCases),
            SourceInput::DocumentFile { path, extension } => self
                .extract_user_stories_as(&path, &extension)
                .await
                .map(GeneratedOutput::Stories),
        }
    }

    /// Generate test cases for a single user story
    pub async fn generate_test_cases(&self, user_story: &str) -> Result<Vec<TestCase>, GenerationError> {
        let json = self.generate_test_cases_json(user_story).await?;
        let cases = decode_test_cases(&json)?;
        info!("Generated {} test cases from user story", cases.len());
        Ok(cases)
    }

    /// Generate test cases for a user story, returning the normalized JSON
    /// without checking its shape
    #[instrument(skip_all, fields(story_chars = user_story.chars().count()))]
    pub async fn generate_test_cases_json(&self, user_story: &str) -> Result<Value, GenerationError> {
        if user_story.trim().is_empty() {
            return Err(GenerationError::EmptyStory);
        }
        self.check_length(user_story)?;

        let prompt = build_story_prompt(user_story);
        self.complete(&prompt).await
    }

    /// Find the user stories in a document and generate test cases for each
    ///
    /// The format is taken from the path's extension.
    pub async fn extract_user_stories(
        &self,
        file_path: &Path,
    ) -> Result<Vec<StoryWithTestCases>, GenerationError> {
        self.extract_user_stories_as(file_path, &extension_of(file_path)).await
    }

    /// Like [`Pipeline::extract_user_stories`], returning the normalized JSON
    /// without checking its shape
    pub async fn extract_user_stories_json(&self, file_path: &Path) -> Result<Value, GenerationError> {
        self.document_json(file_path, &extension_of(file_path)).await
    }

    /// Like [`Pipeline::extract_user_stories`], with the extension supplied
    /// by the caller rather than read from the path
    pub async fn extract_user_stories_as(
        &self,
        file_path: &Path,
        extension: &str,
    ) -> Result<Vec<StoryWithTestCases>, GenerationError> {
        let json = self.document_json(file_path, extension).await?;
        let stories = decode_stories(&json)?;
        info!(
            "Extracted {} user stories with {} test cases from {}",
            stories.len(),
            stories.iter().map(|s| s.test_cases.len()).sum::<usize>(),
            file_path.display()
        );
        Ok(stories)
    }

    #[instrument(skip(self), fields(path = %file_path.display()))]
    async fn document_json(&self, file_path: &Path, extension: &str) -> Result<Value, GenerationError> {
        let text = document::extract(file_path, extension).await?;
        self.check_length(&text)?;

        let prompt = build_extraction_prompt(&text);
        self.complete(&prompt).await
    }

    /// Reject inputs longer than the configured maximum
    fn check_length(&self, text: &str) -> Result<(), GenerationError> {
        let len = text.chars().count();
        if len > self.config.max_input_chars {
            return Err(GenerationError::InputTooLong(len, self.config.max_input_chars));
        }
        Ok(())
    }

    /// Send a prompt and normalize the answer
    async fn complete(&self, prompt: &str) -> Result<Value, GenerationError> {
        debug!("Prompt length: {} chars", prompt.len());

        let started = Instant::now();
        let raw = timeout(self.config.ai_timeout(), self.llm_provider.generate(prompt))
            .await
            .map_err(|_| GenerationError::Timeout(self.config.ai_timeout_secs))??;

        debug!(
            "LLM response length: {} chars after {} ms",
            raw.len(),
            started.elapsed().as_millis()
        );

        normalize(&raw)
    }
}
