//! Parse LLM output into JSON, then into typed test case records

use crate::error::GenerationError;
use casegen_domain::{StoryTestCase, StoryWithTestCases, TestCase};
use serde_json::{Map, Value};
use tracing::error;

/// Strip code fences from a raw AI response and parse what remains as JSON
///
/// Both the language-tagged (```` ```json ````) and bare (```` ``` ````)
/// markers are removed wherever they occur, then surrounding whitespace is
/// trimmed. No repair of malformed JSON is attempted.
///
/// # Errors
///
/// - `EmptyAiContent` if nothing but whitespace is left
/// - `MalformedAiResponse` carrying the raw text if parsing fails
pub fn normalize(raw: &str) -> Result<Value, GenerationError> {
    let cleaned = strip_code_fences(raw);
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return Err(GenerationError::EmptyAiContent);
    }

    serde_json::from_str(cleaned).map_err(|e| {
        error!("AI response ({} chars) is not valid JSON: {}", raw.len(), e);
        GenerationError::MalformedAiResponse {
            raw: raw.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Remove every ```` ```json ```` and ```` ``` ```` marker
fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "")
}

/// Decode the story-path output: a flat array of `TestCase`
///
/// # Errors
///
/// `SchemaViolation` naming the first offending element and field.
pub fn decode_test_cases(json: &Value) -> Result<Vec<TestCase>, GenerationError> {
    expect_array(json, "test cases")?
        .iter()
        .enumerate()
        .map(|(idx, item)| parse_test_case(item).map_err(|e| violation("test case", idx, e)))
        .collect()
}

/// Decode the document-path output: an array of `StoryWithTestCases`
///
/// # Errors
///
/// `SchemaViolation` naming the first offending element and field.
pub fn decode_stories(json: &Value) -> Result<Vec<StoryWithTestCases>, GenerationError> {
    expect_array(json, "stories")?
        .iter()
        .enumerate()
        .map(|(idx, item)| parse_story(item).map_err(|e| violation("story", idx, e)))
        .collect()
}

fn expect_array<'a>(json: &'a Value, what: &str) -> Result<&'a Vec<Value>, GenerationError> {
    json.as_array()
        .ok_or_else(|| GenerationError::SchemaViolation(format!("expected a JSON array of {}", what)))
}

fn violation(what: &str, idx: usize, reason: String) -> GenerationError {
    GenerationError::SchemaViolation(format!("{} {}: {}", what, idx, reason))
}

fn as_object(json: &Value) -> Result<&Map<String, Value>, String> {
    json.as_object().ok_or_else(|| "not a JSON object".to_string())
}

fn string_field(obj: &Map<String, Value>, field: &str) -> Result<String, String> {
    obj.get(field)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| format!("missing or invalid '{}'", field))
}

/// Parse a single story-path test case
fn parse_test_case(json: &Value) -> Result<TestCase, String> {
    let obj = as_object(json)?;

    let id = obj
        .get("id")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| "missing or invalid 'id'".to_string())?;

    Ok(TestCase {
        id,
        title: string_field(obj, "title")?,
        description: string_field(obj, "description")?,
        expected_result: string_field(obj, "expectedResult")?,
    })
}

/// Parse a single story with its nested test cases
fn parse_story(json: &Value) -> Result<StoryWithTestCases, String> {
    let obj = as_object(json)?;

    let story_title = string_field(obj, "story_title")?;

    let test_cases = obj
        .get("test_cases")
        .and_then(|v| v.as_array())
        .ok_or_else(|| "missing or invalid 'test_cases'".to_string())?
        .iter()
        .enumerate()
        .map(|(idx, case)| {
            parse_story_test_case(case).map_err(|e| format!("test case {}: {}", idx, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StoryWithTestCases {
        story_title,
        test_cases,
    })
}

fn parse_story_test_case(json: &Value) -> Result<StoryTestCase, String> {
    let obj = as_object(json)?;

    let steps = obj
        .get("steps")
        .and_then(|v| v.as_array())
        .ok_or_else(|| "missing or invalid 'steps'".to_string())?
        .iter()
        .map(|step| step.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| "'steps' must contain only strings".to_string())?;

    Ok(StoryTestCase {
        id: string_field(obj, "id")?,
        title: string_field(obj, "title")?,
        steps,
        expected_result: string_field(obj, "expected_result")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_plain_json() {
        let value = normalize(r#"{"key": "value"}"#).unwrap();
        assert_eq!(value, json!({"key": "value"}));
    }

    #[test]
    fn test_normalize_is_parse_on_clean_json() {
        let text = r#"[{"id": 1, "nested": {"a": [true, null, 2.5]}}]"#;
        let parsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(normalize(text).unwrap(), parsed);
    }

    #[test]
    fn test_normalize_strips_tagged_fence() {
        let value = normalize("```json\n[1,2,3]\n```").unwrap();
        assert_eq!(value, json!([1, 2, 3]));
    }

    #[test]
    fn test_normalize_strips_bare_fence() {
        let value = normalize("```\n{\"key\": \"value\"}\n```").unwrap();
        assert_eq!(value, json!({"key": "value"}));
    }

    #[test]
    fn test_normalize_strips_fences_with_surrounding_whitespace() {
        let value = normalize("  \n```json\n  [ {\"a\": 1} ]  \n```\n\n").unwrap();
        assert_eq!(value, json!([{"a": 1}]));
    }

    #[test]
    fn test_normalize_empty_and_blank() {
        assert!(matches!(normalize(""), Err(GenerationError::EmptyAiContent)));
        assert!(matches!(normalize("   "), Err(GenerationError::EmptyAiContent)));
        assert!(matches!(normalize("```json\n```"), Err(GenerationError::EmptyAiContent)));
    }

    #[test]
    fn test_normalize_malformed_keeps_raw() {
        match normalize("{not json") {
            Err(GenerationError::MalformedAiResponse { raw, .. }) => assert_eq!(raw, "{not json"),
            other => panic!("Expected MalformedAiResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_does_not_repair_prose() {
        let result = normalize("Here are your test cases:\n```json\n[1]\n```");
        assert!(matches!(result, Err(GenerationError::MalformedAiResponse { .. })));
    }

    #[test]
    fn test_decode_test_cases() {
        let json = json!([
            {"id": 1, "title": "Valid email", "description": "Request reset", "expectedResult": "Email sent"},
            {"id": 2, "title": "Unknown email", "description": "Request reset", "expectedResult": "Generic message"}
        ]);
        let cases = decode_test_cases(&json).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].id, 1);
        assert_eq!(cases[1].expected_result, "Generic message");
    }

    #[test]
    fn test_decode_test_cases_missing_field() {
        let json = json!([
            {"id": 1, "title": "ok", "description": "ok", "expectedResult": "ok"},
            {"id": 2, "title": "no result", "description": "oops"}
        ]);
        match decode_test_cases(&json) {
            Err(GenerationError::SchemaViolation(msg)) => {
                assert!(msg.contains("test case 1"));
                assert!(msg.contains("expectedResult"));
            }
            other => panic!("Expected SchemaViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_test_cases_string_id_rejected() {
        let json = json!([{"id": "1", "title": "t", "description": "d", "expectedResult": "e"}]);
        assert!(matches!(decode_test_cases(&json), Err(GenerationError::SchemaViolation(_))));
    }

    #[test]
    fn test_decode_test_cases_not_array() {
        let json = json!({"id": 1, "title": "t", "description": "d", "expectedResult": "e"});
        assert!(matches!(decode_test_cases(&json), Err(GenerationError::SchemaViolation(_))));
    }

    #[test]
    fn test_decode_stories_preserves_order() {
        let json = json!([
            {
                "story_title": "User can login",
                "test_cases": [
                    {"id": "TC-001", "title": "Valid login", "steps": ["Open", "Submit"], "expected_result": "Dashboard"},
                    {"id": "TC-002", "title": "Bad password", "steps": ["Open", "Submit wrong"], "expected_result": "Error"}
                ]
            },
            {
                "story_title": "User can logout",
                "test_cases": []
            }
        ]);
        let stories = decode_stories(&json).unwrap();
        assert_eq!(stories.len(), 2);
        assert_eq!(stories[0].story_title, "User can login");
        assert_eq!(stories[0].test_cases[1].id, "TC-002");
        assert_eq!(stories[0].test_cases[0].steps, vec!["Open", "Submit"]);
        assert!(stories[1].test_cases.is_empty());
    }

    #[test]
    fn test_decode_stories_non_string_step() {
        let json = json!([{
            "story_title": "s",
            "test_cases": [{"id": "TC-001", "title": "t", "steps": ["ok", 2], "expected_result": "e"}]
        }]);
        match decode_stories(&json) {
            Err(GenerationError::SchemaViolation(msg)) => {
                assert!(msg.contains("story 0"));
                assert!(msg.contains("test case 0"));
                assert!(msg.contains("steps"));
            }
            other => panic!("Expected SchemaViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_stories_missing_test_cases() {
        let json = json!([{"story_title": "s"}]);
        assert!(matches!(decode_stories(&json), Err(GenerationError::SchemaViolation(_))));
    }
}
