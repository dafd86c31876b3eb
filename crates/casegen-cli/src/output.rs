//! Output formatting for the CLI.

use crate::cli::OutputFormat;
use crate::error::Result;
use casegen_domain::{StoryWithTestCases, TestCase};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format test cases generated from a single story.
    pub fn format_test_cases(&self, cases: &[TestCase]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(cases)?),
            OutputFormat::Table => Ok(self.test_cases_table(cases)),
            OutputFormat::Quiet => Ok(cases
                .iter()
                .map(|c| c.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format stories extracted from a document.
    pub fn format_stories(&self, stories: &[StoryWithTestCases]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(stories)?),
            OutputFormat::Table => Ok(self.stories_table(stories)),
            OutputFormat::Quiet => Ok(stories
                .iter()
                .flat_map(|s| s.test_cases.iter().map(|c| c.id.clone()))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn test_cases_table(&self, cases: &[TestCase]) -> String {
        if cases.is_empty() {
            return self.colorize("No test cases generated.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Title", "Description", "Expected Result"]);
        for case in cases {
            builder.push_record([
                case.id.to_string(),
                case.title.clone(),
                case.description.clone(),
                case.expected_result.clone(),
            ]);
        }

        render(builder)
    }

    fn stories_table(&self, stories: &[StoryWithTestCases]) -> String {
        if stories.is_empty() {
            return self.colorize("No user stories found.", "yellow");
        }

        let mut sections = Vec::with_capacity(stories.len());
        for story in stories {
            let heading = self.colorize(&story.story_title, "cyan");
            if story.test_cases.is_empty() {
                sections.push(format!("{}\n{}", heading, self.colorize("(no test cases)", "yellow")));
                continue;
            }

            let mut builder = Builder::default();
            builder.push_record(["ID", "Title", "Steps", "Expected Result"]);
            for case in &story.test_cases {
                let steps = case
                    .steps
                    .iter()
                    .enumerate()
                    .map(|(i, step)| format!("{}. {}", i + 1, step))
                    .collect::<Vec<_>>()
                    .join("\n");
                builder.push_record([
                    case.id.clone(),
                    case.title.clone(),
                    steps,
                    case.expected_result.clone(),
                ]);
            }
            sections.push(format!("{}\n{}", heading, render(builder)));
        }

        sections.join("\n\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().bold().to_string(),
            _ => text.to_string(),
        }
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use casegen_domain::StoryTestCase;

    fn create_test_case() -> TestCase {
        TestCase {
            id: 7,
            title: "Reset with registered email".to_string(),
            description: "Request a reset for a known address".to_string(),
            expected_result: "Reset link is emailed".to_string(),
        }
    }

    fn create_story() -> StoryWithTestCases {
        StoryWithTestCases {
            story_title: "User can reset password".to_string(),
            test_cases: vec![StoryTestCase {
                id: "TC-001".to_string(),
                title: "Reset link".to_string(),
                steps: vec!["Open reset page".to_string(), "Submit email".to_string()],
                expected_result: "Link is sent".to_string(),
            }],
        }
    }

    #[test]
    fn test_json_format_uses_wire_names() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_test_cases(&[create_test_case()]).unwrap();
        assert!(output.contains("\"expectedResult\""));

        let output = formatter.format_stories(&[create_story()]).unwrap();
        assert!(output.contains("\"story_title\""));
        assert!(output.contains("\"expected_result\""));
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_test_cases(&[create_test_case()]).unwrap();
        assert!(output.contains("Expected Result"));
        assert!(output.contains("Reset link is emailed"));
    }

    #[test]
    fn test_story_table_numbers_steps() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_stories(&[create_story()]).unwrap();
        assert!(output.starts_with("User can reset password"));
        assert!(output.contains("1. Open reset page"));
        assert!(output.contains("2. Submit email"));
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(formatter.format_test_cases(&[create_test_case()]).unwrap(), "7");
        assert_eq!(formatter.format_stories(&[create_story()]).unwrap(), "TC-001");
    }

    #[test]
    fn test_empty_results() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert!(formatter.format_test_cases(&[]).unwrap().contains("No test cases"));
        assert!(formatter.format_stories(&[]).unwrap().contains("No user stories"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("done"), "✓ done");
        assert_eq!(formatter.error("failed"), "✗ failed");
    }
}
