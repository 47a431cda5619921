//! Analyze command handler.
//!
//! Sends free text (typed or read from a plain-text file) to the model for a
//! grounded analysis, then reports the lexical confidence metrics over the
//! response. Binary document formats are out of scope: an upstream extractor
//! is expected to produce plain text, and unreadable input surfaces as an
//! extraction error before any network call.

use clap::Args;
use inciq_core::{config::AppConfig, AppError, AppResult};
use inciq_engine::confidence;
use inciq_llm::{create_client, generate_with_retry, LlmRequest, RetryPolicy};
use std::path::PathBuf;
use std::time::Duration;

/// Inputs longer than this are cut down before the call; analysis quality
/// degrades gracefully, response time and cost do not.
const MAX_INPUT_CHARS: usize = 80_000;

const ANALYST_SYSTEM_PROMPT: &str =
    "You are an expert analyst. Provide a deep, structured, accurate summary of the \
     supplied text. Use headings and bullets, bold key terms, and stay strictly \
     grounded in the actual content.";

/// Analyze free text for grounding signals
#[derive(Args, Debug)]
pub struct AnalyzeCommand {
    /// Text to analyze (alternative to --file)
    pub text: Option<String>,

    /// Read the text from a plain-text file
    #[arg(short, long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AnalyzeCommand {
    /// Execute the analyze command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing analyze command");

        let mut text = self.resolve_text()?;
        if text.trim().is_empty() {
            return Err(AppError::Extraction(
                "No text to analyze: provide TEXT or --file".to_string(),
            ));
        }

        if text.chars().count() > MAX_INPUT_CHARS {
            let cut: String = text.chars().take(MAX_INPUT_CHARS).collect();
            tracing::warn!(
                "Input truncated from {} to {} characters",
                text.chars().count(),
                MAX_INPUT_CHARS
            );
            println!(
                "Note: input truncated to {} characters for speed and cost.",
                MAX_INPUT_CHARS
            );
            text = cut;
        }

        let client = create_client(
            "openai-compat",
            &config.api_base,
            config.api_key.as_deref(),
            Duration::from_secs(config.timeout_secs),
        )
        .map_err(AppError::Config)?;

        let request = LlmRequest::new(text, &config.model)
            .with_system(ANALYST_SYSTEM_PROMPT)
            .with_temperature(config.temperature)
            .with_max_tokens(config.max_tokens);

        let outcome = generate_with_retry(client.as_ref(), &request, &RetryPolicy::default()).await?;
        let response = outcome.text().to_string();
        let report = confidence::estimate(&response);

        let words: Vec<&str> = response.split_whitespace().collect();
        let long_words = words.iter().filter(|w| w.len() >= 6).count();

        if self.json {
            let output = serde_json::json!({
                "analysis": response,
                "degraded": outcome.is_degraded(),
                "confidence": report,
                "totalWords": words.len(),
                "longWords": long_words,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", response);
            println!();
            println!(
                "Confidence: {}% [{}]",
                report.score,
                report.label.as_str()
            );
            println!(
                "Signals: grounding {}, hedging {}, model mentions {}",
                report.counts.get("grounding").copied().unwrap_or(0),
                report.counts.get("hedging").copied().unwrap_or(0),
                report.counts.get("model_mentions").copied().unwrap_or(0),
            );
            println!("Words: {} total, {} long", words.len(), long_words);
        }

        Ok(())
    }

    /// Resolve the input text from the positional argument or --file.
    fn resolve_text(&self) -> AppResult<String> {
        if let Some(ref text) = self.text {
            return Ok(text.clone());
        }

        if let Some(ref path) = self.file {
            return std::fs::read_to_string(path).map_err(|e| {
                AppError::Extraction(format!(
                    "Failed to read text from {:?}: {}",
                    path, e
                ))
            });
        }

        Err(AppError::Extraction(
            "No text to analyze: provide TEXT or --file".to_string(),
        ))
    }
}
