//! Casegen Domain Layer
//!
//! Core data model and trait interfaces for the test case generator.
//! Every other crate in the workspace depends on this one; it holds no I/O.
//!
//! ## Key Concepts
//!
//! - **SourceInput**: What a request starts from, a user story or an uploaded document
//! - **DocumentFormat**: The closed set of document formats the extractor understands
//! - **TestCase**: Flat test case record produced from a single user story
//! - **StoryWithTestCases**: A user story found in a document, with its test cases
//! - **LlmProvider**: The seam behind which text generation lives
//!
//! ## Architecture
//!
//! Infrastructure (HTTP clients, document decoders) lives in other crates and
//! plugs in through the traits defined in [`traits`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod source;
pub mod test_case;
pub mod traits;

// Re-exports for convenience
pub use source::{DocumentFormat, SourceInput};
pub use test_case::{GeneratedOutput, StoryTestCase, StoryWithTestCases, TestCase};
pub use traits::LlmProvider;
