//! Retriever: question → embedded query → top-k documents with scores.

use crate::embed::EmbeddingProvider;
use crate::index::VectorIndex;
use crate::types::{Document, RetrievalResult, RetrievedDocument};
use inciq_core::{AppError, AppResult};
use std::sync::Arc;

/// Wraps an embedding provider and an index snapshot for one dataset
/// generation. Holding `Arc`s means an in-flight retrieval keeps working
/// against its snapshot even if the engine swaps in a new dataset.
pub struct Retriever {
    provider: Arc<dyn EmbeddingProvider>,
    index: Arc<VectorIndex>,
    documents: Arc<Vec<Document>>,
}

impl Retriever {
    /// Create a retriever over an index snapshot.
    ///
    /// `documents` must be the corpus the index was built from, in build
    /// order (entry positions map back to document positions).
    pub fn new(
        provider: Arc<dyn EmbeddingProvider>,
        index: Arc<VectorIndex>,
        documents: Arc<Vec<Document>>,
    ) -> Self {
        Self {
            provider,
            index,
            documents,
        }
    }

    /// Retrieve the top-k documents for a question.
    ///
    /// Embedding failures propagate typed — no silent empty-result fallback;
    /// the caller decides whether to retry or abort the turn.
    pub async fn retrieve(&self, question: &str, k: usize) -> AppResult<RetrievalResult> {
        if k == 0 {
            return Err(AppError::Retrieval("k must be at least 1".to_string()));
        }

        if question.trim().is_empty() {
            return Err(AppError::Retrieval("Question must not be empty".to_string()));
        }

        let query = self.provider.embed(question).await?;
        let scored = self.index.search(&query, k)?;

        let hits = scored
            .into_iter()
            .filter_map(|(position, score)| {
                self.documents.get(position).map(|document| RetrievedDocument {
                    document: document.clone(),
                    score,
                })
            })
            .collect();

        let result = RetrievalResult { hits };
        tracing::debug!(
            "Retrieved {} documents for question ({} requested)",
            result.len(),
            k
        );

        Ok(result)
    }
}
