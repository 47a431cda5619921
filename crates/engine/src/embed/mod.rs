//! Embedding providers.
//!
//! Text → fixed-dimension vector, behind a provider trait. Changing the
//! provider or model invalidates any previously built index; the engine
//! rebuilds from scratch on the next dataset load.

pub mod provider;
pub mod providers;

pub use provider::{create_provider, EmbeddingProvider};
