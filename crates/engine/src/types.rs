//! Engine type definitions.

use crate::confidence::ConfidenceReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed-length numeric representation of a text.
pub type EmbeddingVector = Vec<f32>;

/// One normalized incident record.
///
/// Immutable once created from a row. `text` is the canonical rendering used
/// for embedding and context assembly; `fields` preserves the original column
/// values for provenance display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier within a loaded dataset
    pub id: String,

    /// Canonical multi-line text rendering
    pub text: String,

    /// Original column values, including ones the template ignores
    pub fields: BTreeMap<String, String>,

    /// Zero-based position of the source row in the input table
    pub source_index: usize,
}

/// Statistics from a dataset load.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IngestStats {
    /// Rows present in the input table
    pub rows_total: usize,

    /// Documents built from usable rows
    pub documents: usize,

    /// Rows skipped because nothing recognizable could be rendered
    pub rows_skipped: usize,

    /// Content fingerprint of the normalized dataset
    pub fingerprint: String,

    /// Whether an already-built index was reused for this fingerprint
    pub reused_index: bool,
}

/// One retrieved document with its similarity score.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievedDocument {
    pub document: Document,
    pub score: f32,
}

/// Ordered retrieval output: descending score, stable tie-break by row order.
#[derive(Debug, Clone, Serialize, Default)]
pub struct RetrievalResult {
    pub hits: Vec<RetrievedDocument>,
}

impl RetrievalResult {
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Document texts in retrieval order, for context assembly.
    pub fn texts(&self) -> Vec<String> {
        self.hits.iter().map(|h| h.document.text.clone()).collect()
    }
}

/// Complete result of one query turn.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    /// Generated (or degraded-service) answer text
    pub answer: String,

    /// Documents the answer was conditioned on
    pub sources: RetrievalResult,

    /// Lexical grounding-confidence annotation
    pub confidence: ConfidenceReport,

    /// Whether the context block was truncated to fit the budget
    pub context_truncated: bool,

    /// Whether the answer is the degraded-service fallback
    pub degraded: bool,
}
