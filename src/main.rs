mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use quarry::config::QuarryConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quarry", version, about = "Research note scaffolding and search/extract API tooling")]
struct Cli {
    /// Config file (default: ~/.quarry/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new research note from the topic template
    New(cli::new_note::NewArgs),
    /// Run a search and print the raw JSON response
    Search(cli::search::SearchArgs),
    /// Extract content from one or more URLs and print the raw JSON response
    Extract(cli::extract::ExtractArgs),
    /// Ask the chat endpoint a question and print the answer
    Chat(cli::chat::ChatArgs),
    /// Search several queries, extract the top sources, and save everything to disk
    Gather(cli::gather::GatherArgs),
    /// List valid topics
    Topics,
    /// Check workspace templates and API configuration
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => QuarryConfig::load_from(path)?,
        None => QuarryConfig::load()?,
    };

    // Log to stderr so stdout stays clean for paths and JSON.
    let filter = EnvFilter::try_new(&config.general.log_level)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::New(args) => cli::new_note::new_note(&config, args)?,
        Command::Search(args) => cli::search::search(&config, args).await?,
        Command::Extract(args) => cli::extract::extract(&config, args).await?,
        Command::Chat(args) => cli::chat::chat(&config, args).await?,
        Command::Gather(args) => cli::gather::gather(&config, args).await?,
        Command::Topics => cli::topics(),
        Command::Doctor => cli::doctor::doctor(&config)?,
    }

    Ok(())
}
