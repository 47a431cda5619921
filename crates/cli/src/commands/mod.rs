//! Command handlers for the inciq CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod analyze;
pub mod ask;
pub mod chat;
pub mod stats;

// Re-export command types for convenience
pub use analyze::AnalyzeCommand;
pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use stats::StatsCommand;

use inciq_core::{AppConfig, AppError, AppResult};
use inciq_engine::{create_provider, EngineOptions, RagEngine};
use inciq_llm::{create_client, RetryPolicy};
use inciq_prompt::{load_template, PromptTemplate};
use std::path::Path;
use std::time::Duration;

/// Build a fully wired engine from application configuration.
pub(crate) fn build_engine(
    config: &AppConfig,
    template_path: Option<&Path>,
) -> AppResult<RagEngine> {
    let embedder = create_provider(config)?;

    let llm = create_client(
        "openai-compat",
        &config.api_base,
        config.api_key.as_deref(),
        Duration::from_secs(config.timeout_secs),
    )
    .map_err(AppError::Config)?;

    let template = match template_path {
        Some(path) => load_template(path)?,
        None => PromptTemplate::default(),
    };

    Ok(RagEngine::new(
        embedder,
        llm,
        RetryPolicy::default(),
        template,
        EngineOptions::from_config(config),
    ))
}
