//! Casegen Extractor
//!
//! Turns user stories and uploaded documents into structured QA test cases
//! by way of an LLM.
//!
//! # Architecture
//!
//! ```text
//! Document → extract → build prompt → LLM → normalize → decode → Vec<StoryWithTestCases>
//! Story    ───────────→ build prompt → LLM → normalize → decode → Vec<TestCase>
//! ```
//!
//! # Key Features
//!
//! - **Document Extraction**: `.pdf`, `.docx` and `.txt` flattened to plain text
//! - **Prompt Templates**: Two fixed templates, input embedded verbatim
//! - **Response Normalization**: Code fences stripped, strict JSON parsing
//! - **Schema Validation**: Field presence and type checks before typed values leave the crate
//!
//! # Example Usage
//!
//! ```no_run
//! use casegen_extractor::{Pipeline, PipelineConfig};
//! use casegen_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"[{"id": 1, "title": "t", "description": "d", "expectedResult": "e"}]"#);
//! let pipeline = Pipeline::with_provider(llm, PipelineConfig::default());
//!
//! let cases = pipeline
//!     .generate_test_cases("As a user, I want to reset my password.")
//!     .await?;
//!
//! println!("Generated {} test cases", cases.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
pub mod document;
mod error;
pub mod parser;
mod pipeline;
pub mod prompt;


pub use config::PipelineConfig;
pub use error::GenerationError;
pub use parser::{decode_stories, decode_test_cases, normalize};
pub use pipeline::{Pipeline, SharedProvider};
pub use prompt::{build_extraction_prompt, build_story_prompt};
