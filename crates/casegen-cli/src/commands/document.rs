//! Document command implementation.

use crate::cli::DocumentArgs;
use crate::error::Result;
use crate::output::Formatter;
use casegen_extractor::Pipeline;

/// Execute the document command.
pub async fn execute_document(
    args: DocumentArgs,
    pipeline: &Pipeline,
    formatter: &Formatter,
) -> Result<()> {
    let stories = pipeline.extract_user_stories(&args.path).await?;
    println!("{}", formatter.format_stories(&stories)?);

    let case_count: usize = stories.iter().map(|s| s.test_cases.len()).sum();
    eprintln!(
        "{}",
        formatter.success(&format!(
            "{} user stories, {} test cases from {}",
            stories.len(),
            case_count,
            args.path.display()
        ))
    );

    Ok(())
}
