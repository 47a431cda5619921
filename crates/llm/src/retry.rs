//! Explicit retry policy for generation calls.
//!
//! Transient failures (transport errors, timeouts, non-success statuses) get
//! one automatic retry after a short fixed delay. If the retry also fails,
//! the turn completes with a fixed degraded-service answer instead of an
//! error — the session survives an unreachable endpoint. A malformed request
//! (empty prompt) is rejected locally before any network call and is never
//! retried.

use crate::client::{LlmClient, LlmRequest, LlmResponse};
use inciq_core::{AppError, AppResult};
use std::time::Duration;

/// Fixed answer text returned when the endpoint stays unreachable after the
/// retry budget is exhausted.
pub const SERVICE_UNAVAILABLE_MESSAGE: &str =
    "Sorry, the model service is temporarily unreachable. Try again in a minute.";

/// Retry policy evaluated by [`generate_with_retry`].
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first (2 = one retry)
    pub max_attempts: u32,

    /// Fixed delay between attempts
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff: Duration::from_secs(3),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with explicit attempts and backoff.
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }
}

/// Tagged result of a generation attempt under a retry policy.
#[derive(Debug, Clone)]
pub enum GenerationOutcome {
    /// The endpoint answered within the retry budget.
    Answer(LlmResponse),

    /// Every attempt failed; `message` is the fixed degraded-service text.
    Degraded { message: String, attempts: u32 },
}

impl GenerationOutcome {
    /// The answer text to show the user, degraded or not.
    pub fn text(&self) -> &str {
        match self {
            GenerationOutcome::Answer(response) => &response.content,
            GenerationOutcome::Degraded { message, .. } => message,
        }
    }

    /// Whether this outcome is the degraded-service fallback.
    pub fn is_degraded(&self) -> bool {
        matches!(self, GenerationOutcome::Degraded { .. })
    }
}

/// Run a completion under the given retry policy.
///
/// Returns `Err` only for a locally rejected request (empty prompt). Any
/// transport-level failure is absorbed into `GenerationOutcome::Degraded`
/// once the policy is exhausted.
pub async fn generate_with_retry(
    client: &dyn LlmClient,
    request: &LlmRequest,
    policy: &RetryPolicy,
) -> AppResult<GenerationOutcome> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::Generation(
            "Refusing to send an empty prompt".to_string(),
        ));
    }

    let attempts = policy.max_attempts.max(1);
    for attempt in 1..=attempts {
        match client.complete(request).await {
            Ok(response) => {
                if attempt > 1 {
                    tracing::info!("Generation succeeded on attempt {}", attempt);
                }
                return Ok(GenerationOutcome::Answer(response));
            }
            Err(e) => {
                tracing::warn!(
                    "Generation attempt {}/{} failed: {}",
                    attempt,
                    attempts,
                    e
                );
                if attempt < attempts {
                    tokio::time::sleep(policy.backoff).await;
                }
            }
        }
    }

    tracing::error!(
        "Generation failed after {} attempts, returning degraded answer",
        attempts
    );

    Ok(GenerationOutcome::Degraded {
        message: SERVICE_UNAVAILABLE_MESSAGE.to_string(),
        attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LlmUsage;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Test double that fails a fixed number of times before answering.
    struct FlakyClient {
        failures: u32,
        calls: AtomicU32,
    }

    impl FlakyClient {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl LlmClient for FlakyClient {
        fn provider_name(&self) -> &str {
            "flaky"
        }

        async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(AppError::Generation("connection reset".to_string()))
            } else {
                Ok(LlmResponse {
                    content: "ok".to_string(),
                    model: request.model.clone(),
                    usage: LlmUsage::default(),
                })
            }
        }
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::new(2, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_success_first_attempt() {
        let client = FlakyClient::new(0);
        let request = LlmRequest::new("question", "m");

        let outcome = generate_with_retry(&client, &request, &fast_policy())
            .await
            .unwrap();
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.text(), "ok");
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_success_on_retry() {
        let client = FlakyClient::new(1);
        let request = LlmRequest::new("question", "m");

        let outcome = generate_with_retry(&client, &request, &fast_policy())
            .await
            .unwrap();
        assert!(!outcome.is_degraded());
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_degraded_after_exhaustion() {
        let client = FlakyClient::new(u32::MAX);
        let request = LlmRequest::new("question", "m");

        let outcome = generate_with_retry(&client, &request, &fast_policy())
            .await
            .unwrap();
        assert!(outcome.is_degraded());
        assert_eq!(outcome.text(), SERVICE_UNAVAILABLE_MESSAGE);
        // Exactly one retry: two calls total
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_prompt_rejected_locally() {
        let client = FlakyClient::new(0);
        let request = LlmRequest::new("   ", "m");

        let result = generate_with_retry(&client, &request, &fast_policy()).await;
        assert!(result.is_err());
        // Never reached the network
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }
}
