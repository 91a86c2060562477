//! LLM client abstraction.
//!
//! The core treats the language model as a black-box capability:
//! prompt in, text out. Providers implement [`LlmClient`]; tests swap in
//! a scripted mock without touching the answer-generation logic.

use async_trait::async_trait;

use crate::types::Result;

/// Generic LLM client trait for provider abstraction.
///
/// Implementations are expected to decode greedily (temperature 0) so
/// that identical prompts yield identical completions for a fixed model
/// version; the answer generator's determinism contract depends on it.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a completion from a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the model name/identifier.
    fn model_name(&self) -> &str;
}
