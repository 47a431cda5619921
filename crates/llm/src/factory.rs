//! LLM provider factory.
//!
//! This module provides a factory for creating LLM clients based on
//! application configuration. It handles provider resolution and secret
//! injection.

use crate::client::LlmClient;
use crate::providers::ChatCompletionsClient;
use std::sync::Arc;
use std::time::Duration;

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("xai", "openai", "openai-compat")
/// * `base_url` - Endpoint base URL
/// * `api_key` - Bearer credential (required by all current providers)
/// * `timeout` - Per-request timeout
///
/// # Returns
/// A shared trait object implementing `LlmClient`
///
/// # Errors
/// Returns error if the provider is unknown, the credential is missing, or
/// client initialization fails.
pub fn create_client(
    provider: &str,
    base_url: &str,
    api_key: Option<&str>,
    timeout: Duration,
) -> Result<Arc<dyn LlmClient>, String> {
    match provider.to_lowercase().as_str() {
        "xai" | "openai" | "openai-compat" | "grok" => {
            let api_key = api_key
                .ok_or_else(|| format!("Provider '{}' requires an API key", provider))?;
            let client = ChatCompletionsClient::new(base_url, api_key, timeout)
                .map_err(|e| e.to_string())?;
            Ok(Arc::new(client))
        }
        _ => Err(format!("Unknown provider: {}", provider)),
    }
}
