//! Mock implementations for testing.
//!
//! Provides a deterministic fixture embedder and scripted LLM clients so
//! retrieval and generation can be tested end-to-end without model
//! runtimes.

use std::sync::Mutex;

use async_trait::async_trait;
use hera::{AppError, Embedder, LlmClient, Result};

/// Deterministic fixture embedder over a fixed vocabulary.
///
/// Embeds text as L2-normalized term counts, so inner product equals
/// cosine similarity and texts sharing more vocabulary terms with the
/// query score strictly higher. Same input always yields the same
/// vector, matching the determinism contract of the real provider.
pub struct VocabEmbedder {
    vocab: Vec<String>,
}

impl VocabEmbedder {
    /// Build an embedder over the given vocabulary terms.
    pub fn new(vocab: &[&str]) -> Self {
        Self {
            vocab: vocab.iter().map(|s| s.to_lowercase()).collect(),
        }
    }

    /// A vocabulary wide enough for the HIPAA fixture corpora used in
    /// the integration tests.
    pub fn hipaa_fixture() -> Self {
        Self::new(&[
            "minimum",
            "necessary",
            "not",
            "apply",
            "disclosures",
            "individual",
            "covered",
            "entities",
            "limit",
            "privacy",
            "security",
            "safeguards",
            "breach",
            "notification",
            "access",
        ])
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let tokens: Vec<String> = text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_string())
            .collect();

        let mut counts: Vec<f32> = self
            .vocab
            .iter()
            .map(|term| tokens.iter().filter(|t| *t == term).count() as f32)
            .collect();

        let norm: f32 = counts.iter().map(|c| c * c).sum::<f32>().sqrt();
        if norm > 0.0 {
            for c in &mut counts {
                *c /= norm;
            }
        }
        counts
    }
}

#[async_trait]
impl Embedder for VocabEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.vector(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.vocab.len()
    }

    fn model_name(&self) -> &str {
        "vocab-fixture"
    }
}

/// LLM mock that returns a scripted response and records the prompt it
/// was called with.
pub struct ScriptedLlm {
    response: String,
    last_prompt: Mutex<Option<String>>,
}

impl ScriptedLlm {
    /// Create a mock returning `response` for every call.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            last_prompt: Mutex::new(None),
        }
    }

    /// The prompt from the most recent `generate` call.
    #[allow(dead_code)]
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// LLM mock that always fails, for capability-error propagation tests.
#[allow(dead_code)]
pub struct FailingLlm;

#[async_trait]
impl LlmClient for FailingLlm {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(AppError::Llm("model backend unreachable".to_string()))
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}
