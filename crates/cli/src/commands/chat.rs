//! Chat command handler.
//!
//! Interactive REPL over a loaded dataset. The session (turn history) lives
//! here, in the interactive layer; the engine only sees the latest question
//! and rebuilds retrieval context fresh each turn.

use crate::commands::ask::print_answer;
use crate::data;
use clap::Args;
use inciq_core::{config::AppConfig, AppResult};
use inciq_engine::Session;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Interactive chat over a dataset
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Path to the incident dataset (CSV)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Path to a prompt template override (YAML)
    #[arg(long)]
    pub template: Option<PathBuf>,
}

impl ChatCommand {
    /// Execute the chat command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command");

        let mut engine = super::build_engine(config, self.template.as_deref())?;

        let loaded = data::load_rows(&self.data)?;
        let stats = engine.load_dataset(&loaded.rows).await?;

        println!(
            "Loaded {} incidents ({} rows skipped). Ask anything; 'exit' to quit.",
            stats.documents, stats.rows_skipped
        );

        let mut session = Session::new();
        let stdin = std::io::stdin();

        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break; // EOF
            }

            let question = line.trim();
            if question.is_empty() {
                continue;
            }
            if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
                break;
            }

            match engine.submit(&mut session, question).await {
                Ok(answer) => {
                    println!();
                    print_answer(&answer);
                    println!();
                }
                Err(e) => {
                    // Per-turn errors are shown but do not end the session
                    eprintln!("Error: {}", e);
                }
            }
        }

        tracing::info!("Chat session ended after {} turns", session.len());
        Ok(())
    }
}
