//! Generated test case records

use serde::{Deserialize, Serialize};

/// A test case generated from a single user story
///
/// Serialized with the camelCase field names the HTTP surface exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Sequential identifier assigned by the model
    pub id: u64,

    /// Short name of the scenario
    pub title: String,

    /// What the test does, including preconditions
    pub description: String,

    /// Outcome that makes the test pass
    pub expected_result: String,
}

/// A test case attached to a user story discovered in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryTestCase {
    /// Identifier, conventionally `TC-NNN`
    pub id: String,

    /// Brief description of the test case
    pub title: String,

    /// Ordered instructions to execute the test
    pub steps: Vec<String>,

    /// Outcome that should be observed
    pub expected_result: String,
}

impl StoryTestCase {
    /// Whether the id follows the `TC-NNN` numbering convention
    ///
    /// The convention is requested of the model, never enforced.
    pub fn has_conventional_id(&self) -> bool {
        match self.id.strip_prefix("TC-") {
            Some(digits) => digits.len() >= 3 && digits.chars().all(|c| c.is_ascii_digit()),
            None => false,
        }
    }
}

/// A user story found in a document, with the test cases generated for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryWithTestCases {
    /// Title of the user story
    pub story_title: String,

    /// Test cases, in the order the model produced them
    pub test_cases: Vec<StoryTestCase>,
}

/// Typed result of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GeneratedOutput {
    /// Produced from a user story
    TestCases(Vec<TestCase>),

    /// Produced from a document
    Stories(Vec<StoryWithTestCases>),
}

impl GeneratedOutput {
    /// Number of top-level records
    pub fn len(&self) -> usize {
        match self {
            GeneratedOutput::TestCases(cases) => cases.len(),
            GeneratedOutput::Stories(stories) => stories.len(),
        }
    }

    /// Whether the model produced nothing at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
