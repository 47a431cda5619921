//! In-memory vector index with exact cosine k-nearest-neighbor search.
//!
//! Built once per dataset generation and immutable afterwards: the engine
//! swaps in a fresh index only after `build` completes, so a query never
//! observes a half-built index and an in-flight query keeps the snapshot it
//! acquired.

use crate::types::EmbeddingVector;
use inciq_core::{AppError, AppResult};
use std::cmp::Ordering;

/// One stored vector, tied back to its document.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub document_id: String,
    pub vector: EmbeddingVector,
}

/// Immutable in-memory index over a dataset generation.
#[derive(Debug)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
    dimensions: usize,
}

impl VectorIndex {
    /// Build an index from entries.
    ///
    /// Fails on an empty corpus and on any dimensionality mismatch between
    /// entries; both are fatal configuration-level errors, not retryable
    /// ones.
    pub fn build(entries: Vec<IndexEntry>) -> AppResult<Self> {
        let first = entries
            .first()
            .ok_or_else(|| AppError::Index("Cannot build an index over an empty corpus".to_string()))?;

        let dimensions = first.vector.len();
        if dimensions == 0 {
            return Err(AppError::Index(
                "Embedding vectors must be non-empty".to_string(),
            ));
        }

        for entry in &entries {
            if entry.vector.len() != dimensions {
                return Err(AppError::Index(format!(
                    "Dimensionality mismatch: document '{}' has {} dimensions, expected {}",
                    entry.document_id,
                    entry.vector.len(),
                    dimensions
                )));
            }
        }

        tracing::debug!(
            "Built vector index: {} entries, {} dimensions",
            entries.len(),
            dimensions
        );

        Ok(Self {
            entries,
            dimensions,
        })
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Vector dimension shared by every entry.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Exact k-nearest-neighbor search by cosine similarity.
    ///
    /// Returns at most `min(k, n)` results as `(entry position, score)`,
    /// sorted by descending score with ties broken by insertion order —
    /// identical inputs always produce identical output.
    pub fn search(&self, query: &[f32], k: usize) -> AppResult<Vec<(usize, f32)>> {
        if query.len() != self.dimensions {
            return Err(AppError::Index(format!(
                "Query has {} dimensions, index has {}",
                query.len(),
                self.dimensions
            )));
        }

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (position, cosine_similarity(query, &entry.vector)))
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(k.min(self.entries.len()));

        Ok(scored)
    }

    /// Access an entry by its insertion position.
    pub fn entry(&self, position: usize) -> Option<&IndexEntry> {
        self.entries.get(position)
    }
}

/// Calculate cosine similarity between two vectors.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, vector: Vec<f32>) -> IndexEntry {
        IndexEntry {
            document_id: id.to_string(),
            vector,
        }
    }

    #[test]
    fn test_build_empty_corpus_fatal() {
        let result = VectorIndex::build(vec![]);
        assert!(matches!(result, Err(AppError::Index(_))));
    }

    #[test]
    fn test_build_dimension_mismatch_fatal() {
        let result = VectorIndex::build(vec![
            entry("a", vec![1.0, 0.0]),
            entry("b", vec![1.0, 0.0, 0.0]),
        ]);
        assert!(matches!(result, Err(AppError::Index(_))));
    }

    #[test]
    fn test_query_dimension_mismatch_fatal() {
        let index = VectorIndex::build(vec![entry("a", vec![1.0, 0.0])]).unwrap();
        let result = index.search(&[1.0, 0.0, 0.0], 1);
        assert!(matches!(result, Err(AppError::Index(_))));
    }

    #[test]
    fn test_search_orders_by_descending_score() {
        let index = VectorIndex::build(vec![
            entry("far", vec![0.0, 1.0]),
            entry("near", vec![1.0, 0.0]),
            entry("mid", vec![1.0, 1.0]),
        ])
        .unwrap();

        let results = index.search(&[1.0, 0.0], 3).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(index.entry(results[0].0).unwrap().document_id, "near");
        assert_eq!(index.entry(results[1].0).unwrap().document_id, "mid");
        assert_eq!(index.entry(results[2].0).unwrap().document_id, "far");
        // Non-increasing scores
        assert!(results[0].1 >= results[1].1);
        assert!(results[1].1 >= results[2].1);
    }

    #[test]
    fn test_search_returns_min_k_n() {
        let index = VectorIndex::build(vec![
            entry("a", vec![1.0, 0.0]),
            entry("b", vec![0.0, 1.0]),
        ])
        .unwrap();

        assert_eq!(index.search(&[1.0, 0.0], 10).unwrap().len(), 2);
        assert_eq!(index.search(&[1.0, 0.0], 1).unwrap().len(), 1);
    }

    #[test]
    fn test_tie_break_by_insertion_order() {
        // Identical vectors: scores tie exactly
        let index = VectorIndex::build(vec![
            entry("first", vec![1.0, 0.0]),
            entry("second", vec![1.0, 0.0]),
            entry("third", vec![1.0, 0.0]),
        ])
        .unwrap();

        let results = index.search(&[1.0, 0.0], 3).unwrap();
        let ids: Vec<&str> = results
            .iter()
            .map(|(pos, _)| index.entry(*pos).unwrap().document_id.as_str())
            .collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_search_deterministic() {
        let entries = vec![
            entry("a", vec![0.3, 0.7]),
            entry("b", vec![0.7, 0.3]),
            entry("c", vec![0.5, 0.5]),
        ];
        let index1 = VectorIndex::build(entries.clone()).unwrap();
        let index2 = VectorIndex::build(entries).unwrap();

        let r1 = index1.search(&[0.6, 0.4], 3).unwrap();
        let r2 = index2.search(&[0.6, 0.4], 3).unwrap();
        assert_eq!(r1, r2);
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 0.001);
        assert!((cosine_similarity(&[1.0, 0.0], &[0.0, 1.0])).abs() < 0.001);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
