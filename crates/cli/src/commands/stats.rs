//! Stats command handler.
//!
//! Ingestion statistics for a dataset without touching the network: rows,
//! documents, skips, and the content fingerprint that keys index reuse.

use crate::data;
use clap::Args;
use inciq_core::{config::AppConfig, AppResult};
use inciq_engine::{create_provider, dataset, fingerprint};
use std::path::PathBuf;

/// Show dataset ingestion statistics
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// Path to the incident dataset (CSV)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    /// Execute the stats command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing stats command");

        let loaded = data::load_rows(&self.data)?;
        let (documents, rows_skipped) = dataset::ingest(&loaded.rows)?;
        let fingerprint = fingerprint::dataset_fingerprint(&documents);

        let provider = create_provider(config)?;

        if self.json {
            let output = serde_json::json!({
                "dataset": self.data,
                "rowsTotal": loaded.rows.len(),
                "recordsUnparsable": loaded.records_skipped,
                "documents": documents.len(),
                "rowsSkipped": rows_skipped,
                "fingerprint": fingerprint,
                "embedding": {
                    "provider": provider.provider_name(),
                    "model": provider.model_name(),
                    "dimensions": provider.dimensions(),
                },
                "topK": config.top_k,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("Dataset: {}", self.data.display());
            println!(
                "Rows: {} ({} unparsable records dropped)",
                loaded.rows.len(),
                loaded.records_skipped
            );
            println!(
                "Documents: {} ({} rows skipped as unusable)",
                documents.len(),
                rows_skipped
            );
            println!("Fingerprint: {}", fingerprint);
            println!(
                "Embedding: {} / {} ({} dims)",
                provider.provider_name(),
                provider.model_name(),
                provider.dimensions()
            );
            println!("Retrieval k: {}", config.top_k);
        }

        Ok(())
    }
}
