//! LLM integration crate for the inciq CLI.
//!
//! This crate provides a provider-agnostic abstraction for interacting with
//! text-generation endpoints, plus the explicit retry policy applied to
//! transient failures.
//!
//! # Providers
//! - **OpenAI-compatible chat completions** (xAI/Grok, OpenAI, and any
//!   endpoint speaking the same wire format)
//!
//! # Example
//! ```no_run
//! use inciq_llm::{ChatCompletionsClient, LlmClient, LlmRequest};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ChatCompletionsClient::new(
//!     "https://api.x.ai/v1",
//!     "sk-key",
//!     Duration::from_secs(90),
//! )?;
//! let request = LlmRequest::new("Summarize incident I1.", "grok-3-mini");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod retry;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::ChatCompletionsClient;
pub use retry::{generate_with_retry, GenerationOutcome, RetryPolicy, SERVICE_UNAVAILABLE_MESSAGE};
