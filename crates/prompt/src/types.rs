//! Prompt system type definitions.

use serde::{Deserialize, Serialize};

/// A prompt template: a fixed system instruction plus a Handlebars user
/// template over `{{today}}`, `{{context}}` and `{{question}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptTemplate {
    /// Template identifier
    pub id: String,

    /// System instruction sent alongside the rendered user prompt
    pub system: String,

    /// Handlebars template for the user message
    pub template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            id: "incident.analyst.default".to_string(),
            system: "You are an expert incident analyst. Answer ONLY using the context below. \
                     If you are not sure, say \"I don't have enough information\"."
                .to_string(),
            template: "Today's date: {{today}}\n\nContext:\n{{context}}\n\nQuestion: {{question}}\nAnswer:"
                .to_string(),
        }
    }
}

/// Length ceiling for the assembled context block.
#[derive(Debug, Clone, Copy)]
pub struct ContextBudget {
    /// Maximum characters of document text included in the prompt
    pub max_context_chars: usize,
}

impl Default for ContextBudget {
    fn default() -> Self {
        Self {
            max_context_chars: 12_000,
        }
    }
}

impl ContextBudget {
    pub fn new(max_context_chars: usize) -> Self {
        Self { max_context_chars }
    }
}

/// Dynamic facts injected into every prompt.
///
/// Recomputed fresh on each query so relative-date reasoning never works
/// from a stale value.
#[derive(Debug, Clone)]
pub struct DynamicFacts {
    /// Current date, e.g. "2026-08-08"
    pub today: String,
}

impl DynamicFacts {
    /// Capture the current date.
    pub fn now() -> Self {
        Self {
            today: chrono::Utc::now().format("%Y-%m-%d").to_string(),
        }
    }

    /// Build facts from a fixed date (tests and replays).
    pub fn with_date(today: impl Into<String>) -> Self {
        Self {
            today: today.into(),
        }
    }
}

/// A fully assembled prompt ready for the generation client.
#[derive(Debug, Clone)]
pub struct AssembledPrompt {
    /// System instruction
    pub system: String,

    /// Rendered user message
    pub user: String,

    /// How many retrieved documents made it into the context block
    pub documents_included: usize,

    /// Whether the context block was cut down to fit the budget
    pub truncated: bool,
}
