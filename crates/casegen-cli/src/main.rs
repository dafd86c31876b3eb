//! Casegen CLI - Generate test cases from user stories and requirement documents.

use casegen_cli::commands;
use casegen_cli::{config, Cli, Command, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // A missing .env is fine; the environment may already carry the key
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let formatter = Formatter::new(cli.format, !cli.no_color);

    init_tracing();

    if let Err(e) = run(cli, &formatter).await {
        eprintln!("{}", formatter.error(&e.to_string()));
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output on stdout stays machine-readable
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli, formatter: &Formatter) -> casegen_cli::Result<()> {
    let config = config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Serve(args) => commands::execute_serve(args, config).await?,
        Command::Story(args) => {
            let pipeline = commands::build_pipeline(&config)?;
            commands::execute_story(args, &pipeline, formatter).await?;
        }
        Command::Document(args) => {
            let pipeline = commands::build_pipeline(&config)?;
            commands::execute_document(args, &pipeline, formatter).await?;
        }
    }

    Ok(())
}
