//! LLM prompt templates for test case generation
//!
//! Each template has exactly one placeholder. The input is embedded verbatim,
//! untruncated and unescaped, between `---` delimiter lines.

const PLACEHOLDER: &str = "{{input}}";

/// The two fixed prompt templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    /// User story in, flat array of test cases out
    Story,
    /// Document text in, array of stories with their test cases out
    Extraction,
}

impl PromptTemplate {
    fn text(&self) -> &'static str {
        match self {
            PromptTemplate::Story => STORY_TEMPLATE,
            PromptTemplate::Extraction => EXTRACTION_TEMPLATE,
        }
    }

    /// Substitute `input` for the placeholder
    ///
    /// The template is split once, so placeholder-like text inside `input`
    /// is left alone.
    pub fn render(&self, input: &str) -> String {
        let (before, after) = self
            .text()
            .split_once(PLACEHOLDER)
            .unwrap_or((self.text(), ""));

        let mut prompt = String::with_capacity(before.len() + input.len() + after.len());
        prompt.push_str(before);
        prompt.push_str(input);
        prompt.push_str(after);
        prompt
    }
}

/// Prompt asking for a flat JSON array of `TestCase` objects
pub fn build_story_prompt(user_story: &str) -> String {
    PromptTemplate::Story.render(user_story)
}

/// Prompt asking for a JSON array of `StoryWithTestCases`, one per user
/// story found in the document
pub fn build_extraction_prompt(document_text: &str) -> String {
    PromptTemplate::Extraction.render(document_text)
}

const STORY_TEMPLATE: &str = r#"You are a QA engineer. Given the following user story, generate all possible relevant test cases in JSON array format.
Each test case should include edge cases, negative scenarios, and boundary conditions where applicable.

Each test case should have the following fields:
- id (number)
- title (string)
- description (string)
- expectedResult (string)

User Story:
---
{{input}}
---

Respond only with the raw JSON array. Do not include any markdown, explanations, or formatting."#;

const EXTRACTION_TEMPLATE: &str = r#"You are a QA test engineer.

Given a document with multiple user stories, generate functional test cases for each user story.

For each user story, output a JSON object that contains:
- "story_title": the title of the user story
- "test_cases": an array of test case objects

Each test case object must have:
- "id": a unique test case identifier (e.g., TC-001, TC-002, etc.)
- "title": a brief description of the test case
- "steps": an ordered list of instructions to execute the test
- "expected_result": the outcome that should be observed

Input Document:
---
{{input}}
---

Output Format:
Respond only with a JSON array where each item corresponds to a user story and includes its test cases.

Example:
[
  {
    "story_title": "User can login",
    "test_cases": [
      {
        "id": "TC-001",
        "title": "Successful login with valid credentials",
        "steps": ["Go to login page", "Enter valid username", "Enter valid password", "Click login"],
        "expected_result": "User is redirected to the dashboard"
      }
    ]
  }
]

Respond only with raw JSON. Do not include any markdown, explanation, or additional formatting.

Begin:
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_have_exactly_one_placeholder() {
        assert_eq!(STORY_TEMPLATE.matches(PLACEHOLDER).count(), 1);
        assert_eq!(EXTRACTION_TEMPLATE.matches(PLACEHOLDER).count(), 1);
    }

    #[test]
    fn test_story_prompt_includes_story_verbatim() {
        let story = "As a user, I want to reset my password so I can regain access to my account.";
        let prompt = build_story_prompt(story);
        assert!(prompt.contains(story));
        assert!(!prompt.contains(PLACEHOLDER));
    }

    #[test]
    fn test_story_prompt_includes_instructions() {
        let prompt = build_story_prompt("story");
        assert!(prompt.contains("edge cases, negative scenarios, and boundary conditions"));
        assert!(prompt.contains("expectedResult"));
        assert!(prompt.contains("Respond only with the raw JSON array"));
    }

    #[test]
    fn test_extraction_prompt_includes_document_verbatim() {
        let text = "Story 1: login.\n\n  Story 2: \"logout\" {with braces} and ```fences```";
        let prompt = build_extraction_prompt(text);
        assert!(prompt.contains(text));
        assert!(prompt.contains("story_title"));
        assert!(prompt.contains("TC-001"));
        assert!(prompt.contains("Do not include any markdown"));
    }

    #[test]
    fn test_placeholder_in_input_is_not_expanded() {
        let prompt = build_story_prompt("literal {{input}} here");
        assert!(prompt.contains("literal {{input}} here"));
        assert_eq!(prompt.matches(PLACEHOLDER).count(), 1);
    }

    #[test]
    fn test_long_input_is_not_truncated() {
        let text = "x".repeat(100_000);
        let prompt = build_extraction_prompt(&text);
        assert!(prompt.len() > 100_000);
        assert!(prompt.contains(&text));
    }

    #[test]
    fn test_prompts_are_deterministic() {
        assert_eq!(build_story_prompt("same"), build_story_prompt("same"));
        assert_ne!(build_story_prompt("same"), build_extraction_prompt("same"));
    }

    #[test]
    fn test_empty_input_renders() {
        let prompt = PromptTemplate::Story.render("");
        assert!(prompt.contains("User Story:\n---\n\n---"));
    }
}
