//! Retrieval-augmented query engine over incident records.
//!
//! Pipeline, build time: rows → [`record`] normalizer → [`embed`] provider →
//! [`index::VectorIndex`] (built once per dataset, memoized by content
//! fingerprint). Query time: question → [`retriever::Retriever`] → prompt
//! assembly → generation with retry → [`confidence`] annotation.
//!
//! The corpus is bounded and held fully in memory; the index is never
//! persisted across restarts.

pub mod confidence;
pub mod dataset;
pub mod embed;
pub mod engine;
pub mod fingerprint;
pub mod index;
pub mod record;
pub mod retriever;
pub mod session;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use confidence::{estimate, ConfidenceLabel, ConfidenceReport};
pub use embed::{create_provider, EmbeddingProvider};
pub use engine::{EngineOptions, RagEngine};
pub use index::{IndexEntry, VectorIndex};
pub use record::Record;
pub use retriever::Retriever;
pub use session::{ConversationTurn, Role, Session};
pub use types::{Answer, Document, EmbeddingVector, IngestStats, RetrievalResult, RetrievedDocument};
