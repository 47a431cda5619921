//! LLM provider implementations.

pub mod chat;

pub use chat::ChatCompletionsClient;
