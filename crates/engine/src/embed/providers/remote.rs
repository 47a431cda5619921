//! Remote embedding provider over an OpenAI-compatible `/embeddings` endpoint.
//!
//! Batch-first: one request carries the whole text array. Transport and
//! status failures surface as retryable embedding errors; the caller decides
//! whether to retry or abort the turn.

use crate::embed::provider::EmbeddingProvider;
use crate::types::EmbeddingVector;
use inciq_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request payload for the embeddings API.
#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

/// Response from the embeddings API.
#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
    #[serde(default)]
    index: usize,
}

/// Hosted embedding provider.
#[derive(Debug)]
pub struct RemoteProvider {
    /// API base URL
    base_url: String,

    /// Bearer credential
    api_key: String,

    /// Model name
    model: String,

    /// Expected embedding dimensions
    dimensions: usize,

    /// HTTP client with timeout applied
    client: reqwest::Client,
}

impl RemoteProvider {
    /// Create a new remote provider.
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        dimensions: usize,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Embedding(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            dimensions,
            client,
        })
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for RemoteProvider {
    fn provider_name(&self) -> &str {
        "remote"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<EmbeddingVector>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/embeddings", self.base_url);
        let request = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        tracing::debug!("Embedding batch of {} texts via {}", texts.len(), url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Embedding(format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Embedding(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        let body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| AppError::Embedding(format!("Failed to parse response: {}", e)))?;

        if body.data.len() != texts.len() {
            return Err(AppError::Embedding(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                body.data.len()
            )));
        }

        // The API may return data out of order; restore input order by index
        let mut data = body.data;
        data.sort_by_key(|d| d.index);

        for datum in &data {
            if datum.embedding.len() != self.dimensions {
                return Err(AppError::Embedding(format!(
                    "Model '{}' returned {} dimensions, expected {}",
                    self.model,
                    datum.embedding.len(),
                    self.dimensions
                )));
            }
        }

        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> RemoteProvider {
        RemoteProvider::new(
            "https://api.x.ai/v1/",
            "sk-key",
            "text-embedding-3-small",
            384,
            Duration::from_secs(30),
        )
        .unwrap()
    }

    #[test]
    fn test_provider_metadata() {
        let p = provider();
        assert_eq!(p.provider_name(), "remote");
        assert_eq!(p.model_name(), "text-embedding-3-small");
        assert_eq!(p.dimensions(), 384);
        assert_eq!(p.base_url, "https://api.x.ai/v1");
    }

    #[test]
    fn test_response_parsing_out_of_order() {
        let body = r#"{
            "data": [
                {"embedding": [0.0, 1.0], "index": 1},
                {"embedding": [1.0, 0.0], "index": 0}
            ]
        }"#;
        let mut parsed: EmbeddingResponse = serde_json::from_str(body).unwrap();
        parsed.data.sort_by_key(|d| d.index);
        assert_eq!(parsed.data[0].embedding, vec![1.0, 0.0]);
        assert_eq!(parsed.data[1].embedding, vec![0.0, 1.0]);
    }

    #[tokio::test]
    async fn test_empty_batch_short_circuits() {
        let p = provider();
        let result = p.embed_batch(&[]).await.unwrap();
        assert!(result.is_empty());
    }
}
