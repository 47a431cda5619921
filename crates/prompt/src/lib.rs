//! Prompt assembly for the inciq CLI.
//!
//! This crate builds the generation prompt for a query turn:
//! - A fixed instruction template (Handlebars-rendered)
//! - A dynamic fact block (current date, recomputed each query)
//! - A bounded block of retrieved document text
//! - The raw user question
//!
//! Truncation of the context block is signaled, never silent.

pub mod assembler;
pub mod loader;
pub mod types;

// Re-export main types
pub use assembler::assemble;
pub use loader::load_template;
pub use types::{AssembledPrompt, ContextBudget, DynamicFacts, PromptTemplate};
