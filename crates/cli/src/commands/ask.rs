//! Ask command handler.
//!
//! One-shot question answering against an incident dataset.

use crate::data;
use clap::Args;
use inciq_core::{config::AppConfig, AppError, AppResult};
use inciq_engine::{Answer, Session};
use std::path::PathBuf;

/// Ask one question against a dataset
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Path to the incident dataset (CSV)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Number of documents to retrieve
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Path to a prompt template override (YAML)
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let mut config = config.clone();
        if let Some(top_k) = self.top_k {
            if top_k == 0 {
                return Err(AppError::Retrieval("k must be at least 1".to_string()));
            }
            config.top_k = top_k;
        }

        let mut engine = super::build_engine(&config, self.template.as_deref())?;

        let loaded = data::load_rows(&self.data)?;
        let stats = engine.load_dataset(&loaded.rows).await?;
        tracing::debug!(
            "Dataset ready: {} documents (fingerprint {})",
            stats.documents,
            &stats.fingerprint[..12.min(stats.fingerprint.len())]
        );

        let mut session = Session::new();
        let answer = engine.submit(&mut session, &self.question).await?;

        if self.json {
            print_json(&answer)?;
        } else {
            print_answer(&answer);
        }

        Ok(())
    }
}

/// Serialize a full answer (sources and confidence included) to stdout.
pub(crate) fn print_json(answer: &Answer) -> AppResult<()> {
    let json = serde_json::to_string_pretty(answer)?;
    println!("{}", json);
    Ok(())
}

/// Human-readable answer block shared by ask and chat.
pub(crate) fn print_answer(answer: &Answer) {
    println!("{}", answer.answer);
    println!();

    if answer.context_truncated {
        println!("(context was truncated to fit the length budget)");
    }

    if !answer.sources.is_empty() {
        println!("Sources:");
        for (i, hit) in answer.sources.hits.iter().enumerate() {
            let snippet: String = hit.document.text.lines().next().unwrap_or("").to_string();
            println!(
                "  {}. {} (score {:.3}) | {}",
                i + 1,
                hit.document.id,
                hit.score,
                snippet
            );
        }
        println!();
    }

    println!(
        "Confidence: {}% [{}] (grounding: {}, hedging: {}, model mentions: {})",
        answer.confidence.score,
        answer.confidence.label.as_str(),
        answer.confidence.counts.get("grounding").copied().unwrap_or(0),
        answer.confidence.counts.get("hedging").copied().unwrap_or(0),
        answer.confidence.counts.get("model_mentions").copied().unwrap_or(0),
    );
}
