//! Story command implementation.

use crate::cli::StoryArgs;
use crate::error::Result;
use crate::output::Formatter;
use casegen_extractor::Pipeline;
use std::io::Read;

/// Execute the story command.
pub async fn execute_story(args: StoryArgs, pipeline: &Pipeline, formatter: &Formatter) -> Result<()> {
    let story = read_story(args)?;

    let cases = pipeline.generate_test_cases(&story).await?;
    println!("{}", formatter.format_test_cases(&cases)?);

    Ok(())
}

/// Story text comes from the argument, a file, or stdin, in that order
fn read_story(args: StoryArgs) -> Result<String> {
    if let Some(text) = args.text {
        return Ok(text);
    }
    if let Some(path) = args.file {
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut story = String::new();
    std::io::stdin().read_to_string(&mut story)?;
    Ok(story)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_story_from_argument() {
        let args = StoryArgs {
            text: Some("As a user, I want to log in.".to_string()),
            file: None,
        };
        assert_eq!(read_story(args).unwrap(), "As a user, I want to log in.");
    }

    #[test]
    fn test_story_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("story.txt");
        std::fs::write(&path, "As an admin, I want to lock accounts.").unwrap();

        let args = StoryArgs {
            text: None,
            file: Some(path),
        };
        assert_eq!(read_story(args).unwrap(), "As an admin, I want to lock accounts.");
    }
}
