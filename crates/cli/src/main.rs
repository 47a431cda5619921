//! Inciq CLI
//!
//! Main entry point for the inciq command-line tool.
//! Retrieval-augmented question answering over incident record datasets.

mod commands;
mod data;

use clap::{Parser, Subcommand};
use commands::{AnalyzeCommand, AskCommand, ChatCommand, StatsCommand};
use inciq_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Inciq CLI - retrieval-augmented incident analysis
#[derive(Parser, Debug)]
#[command(name = "inciq")]
#[command(about = "Retrieval-augmented question answering over incident records", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "INCIQ_CONFIG")]
    config: Option<PathBuf>,

    /// API base URL (OpenAI-compatible)
    #[arg(long, global = true, env = "INCIQ_API_BASE")]
    api_base: Option<String>,

    /// Chat model identifier
    #[arg(short, long, global = true, env = "INCIQ_MODEL")]
    model: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask one question against a dataset
    Ask(AskCommand),

    /// Interactive chat over a dataset
    Chat(ChatCommand),

    /// Analyze free text for grounding signals
    Analyze(AnalyzeCommand),

    /// Show dataset ingestion statistics
    Stats(StatsCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.config,
        cli.api_base,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Inciq CLI starting");
    tracing::debug!("API base: {}", config.api_base);
    tracing::debug!("Model: {}", config.model);
    tracing::debug!("Embedding provider: {}", config.embed_provider);

    config.validate()?;

    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Chat(_) => "chat",
        Commands::Analyze(_) => "analyze",
        Commands::Stats(_) => "stats",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Analyze(cmd) => cmd.execute(&config).await,
        Commands::Stats(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
