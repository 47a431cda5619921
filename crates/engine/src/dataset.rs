//! Dataset ingestion: total over arbitrary row sets.
//!
//! Unusable rows are skipped with a warning and counted; a dataset yielding
//! no documents at all is a fatal ingestion error (answering over an empty
//! corpus would be misleading).

use crate::record::{self, Record};
use crate::types::Document;
use inciq_core::{AppError, AppResult};
use std::collections::HashSet;

/// Normalize every row of a loaded table into documents.
///
/// Returns the documents plus the number of rows skipped. Document ids are
/// made unique: a repeated incident number is disambiguated with the row
/// index rather than dropping the record.
pub fn ingest(rows: &[Record]) -> AppResult<(Vec<Document>, usize)> {
    if rows.is_empty() {
        return Err(AppError::Ingestion("Dataset contains no rows".to_string()));
    }

    let mut documents = Vec::with_capacity(rows.len());
    let mut seen_ids: HashSet<String> = HashSet::with_capacity(rows.len());
    let mut skipped = 0usize;

    for (source_index, row) in rows.iter().enumerate() {
        match record::normalize(row, source_index) {
            Some(mut doc) => {
                if !seen_ids.insert(doc.id.clone()) {
                    let unique = format!("{}@{}", doc.id, source_index);
                    tracing::warn!(
                        "Duplicate document id '{}' at row {}, renamed to '{}'",
                        doc.id,
                        source_index,
                        unique
                    );
                    seen_ids.insert(unique.clone());
                    doc.id = unique;
                }
                documents.push(doc);
            }
            None => {
                tracing::warn!("Skipping row {}: no recognizable fields", source_index);
                skipped += 1;
            }
        }
    }

    if documents.is_empty() {
        return Err(AppError::Ingestion(
            "Dataset contains no usable rows".to_string(),
        ));
    }

    tracing::info!(
        "Ingested {} documents ({} rows skipped)",
        documents.len(),
        skipped
    );

    Ok((documents, skipped))
}
