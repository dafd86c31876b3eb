//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Casegen CLI - Generate test cases from user stories and requirement documents.
#[derive(Debug, Parser)]
#[command(name = "casegen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CASEGEN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Generate test cases for a single user story
    Story(StoryArgs),

    /// Extract user stories from a .pdf, .docx or .txt file and generate test cases
    Document(DocumentArgs),
}

/// Arguments for the serve command.
#[derive(Debug, Parser)]
pub struct ServeArgs {
    /// Override the bind port
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the story command.
#[derive(Debug, Parser)]
pub struct StoryArgs {
    /// User story text; read from stdin when omitted
    pub text: Option<String>,

    /// Read the story from a file instead
    #[arg(short = 'i', long, conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

/// Arguments for the document command.
#[derive(Debug, Parser)]
pub struct DocumentArgs {
    /// Path to the requirements document
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_command() {
        let cli = Cli::parse_from(["casegen", "story", "As a user, I want to log in."]);
        match cli.command {
            Command::Story(args) => {
                assert_eq!(args.text.as_deref(), Some("As a user, I want to log in."));
                assert!(args.file.is_none());
            }
            _ => panic!("Expected Story command"),
        }
        assert_eq!(cli.format, OutputFormat::Table);
    }

    #[test]
    fn test_document_command_with_global_flags() {
        let cli = Cli::parse_from([
            "casegen",
            "document",
            "requirements.docx",
            "--format",
            "json",
            "--no-color",
        ]);
        match cli.command {
            Command::Document(args) => assert_eq!(args.path, PathBuf::from("requirements.docx")),
            _ => panic!("Expected Document command"),
        }
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.no_color);
    }

    #[test]
    fn test_story_text_and_file_conflict() {
        let result = Cli::try_parse_from(["casegen", "story", "text", "--file", "story.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_serve_port_override() {
        let cli = Cli::parse_from(["casegen", "serve", "--port", "8080"]);
        match cli.command {
            Command::Serve(args) => assert_eq!(args.port, Some(8080)),
            _ => panic!("Expected Serve command"),
        }
    }
}
