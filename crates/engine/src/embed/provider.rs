//! Embedding provider trait and factory.

use crate::types::EmbeddingVector;
use inciq_core::{AppConfig, AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;

/// Trait for embedding providers.
///
/// Deterministic for a given model identity; may be slow and may fail
/// (network- or model-bound). Batch invocation is the primary path.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync + std::fmt::Debug {
    /// Get provider name (e.g., "hashed", "remote")
    fn provider_name(&self) -> &str;

    /// Get model identifier
    fn model_name(&self) -> &str;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Generate embeddings for multiple texts in a batch.
    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<EmbeddingVector>>;

    /// Generate embedding for a single text (convenience method).
    async fn embed(&self, text: &str) -> AppResult<EmbeddingVector> {
        let mut results = self.embed_batch(&[text.to_string()]).await?;
        results
            .pop()
            .ok_or_else(|| AppError::Embedding("No embedding returned".to_string()))
    }
}

/// Create an embedding provider based on configuration.
pub fn create_provider(config: &AppConfig) -> AppResult<Arc<dyn EmbeddingProvider>> {
    match config.embed_provider.as_str() {
        "hashed" => {
            let provider = super::providers::hashed::HashedProvider::new(config.embed_dimensions);
            Ok(Arc::new(provider))
        }

        "remote" => {
            let api_key = config.api_key.as_deref().ok_or_else(|| {
                AppError::Config("Remote embedding provider requires INCIQ_API_KEY".to_string())
            })?;
            let provider = super::providers::remote::RemoteProvider::new(
                &config.api_base,
                api_key,
                &config.embed_model,
                config.embed_dimensions,
                Duration::from_secs(config.timeout_secs),
            )?;
            Ok(Arc::new(provider))
        }

        other => Err(AppError::Config(format!(
            "Unknown embedding provider: '{}'. Supported providers: hashed, remote",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_hashed_provider() {
        let config = AppConfig::default();
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.provider_name(), "hashed");
        assert_eq!(provider.dimensions(), 384);
    }

    #[test]
    fn test_create_remote_without_key() {
        let mut config = AppConfig::default();
        config.embed_provider = "remote".to_string();
        config.api_key = None;
        assert!(create_provider(&config).is_err());
    }

    #[test]
    fn test_create_unknown_provider() {
        let mut config = AppConfig::default();
        config.embed_provider = "quantum".to_string();
        let result = create_provider(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unknown embedding provider"));
    }

    #[tokio::test]
    async fn test_provider_embed_single() {
        let config = AppConfig::default();
        let provider = create_provider(&config).unwrap();

        let embedding = provider.embed("test text").await.unwrap();
        assert_eq!(embedding.len(), 384);
    }
}
