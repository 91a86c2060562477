//! Grounded answer generation.
//!
//! Retrieved chunk texts are assembled into a context block and wrapped
//! in a single instruction prompt that restricts the model to that
//! context. The model's raw response is returned unmodified.

use std::sync::Arc;

use tracing::debug;

use crate::llm::LlmClient;
use crate::types::{Result, RetrievedChunk};

/// Build the grounded instruction prompt for a query and its retrieved
/// context.
///
/// The prompt establishes the restricted role, forbids fabrication
/// beyond the supplied context, asks for explicit citation, then embeds
/// the context block and the original question. Chunk texts appear in
/// retrieval order, separated by a paragraph break.
pub fn build_prompt(query: &str, retrieved: &[RetrievedChunk]) -> String {
    let context = retrieved
        .iter()
        .map(|chunk| chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are a HIPAA compliance assistant.\n\
         Use ONLY the context below to answer the question.\n\
         If the context does not contain the answer, say that you do not \
         have enough information.\n\
         Do NOT fabricate anything beyond the given context. Cite the \
         supporting text explicitly.\n\
         \n\
         Context:\n\
         {context}\n\
         \n\
         Question:\n\
         {query}\n"
    )
}

/// Produces context-constrained, cited answers via an LLM capability.
///
/// Stateless: each call is an independent request/response over the
/// immutable retrieved payloads.
pub struct AnswerGenerator {
    llm: Arc<dyn LlmClient>,
}

impl AnswerGenerator {
    /// Create a generator over the given LLM client.
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Generate a grounded answer for `query` from `retrieved` chunks.
    ///
    /// An empty `retrieved` slice is legal: the context block is empty
    /// and the model is still invoked, yielding a "no information" style
    /// response rather than an error. With greedy decoding, identical
    /// `(query, retrieved)` pairs produce identical answers for a fixed
    /// model version.
    pub async fn generate_answer(&self, query: &str, retrieved: &[RetrievedChunk]) -> Result<String> {
        let prompt = build_prompt(query, retrieved);
        debug!(
            model = self.llm.model_name(),
            context_chunks = retrieved.len(),
            "Generating answer"
        );
        self.llm.generate(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AppError;
    use async_trait::async_trait;

    fn payload(text: &str) -> RetrievedChunk {
        RetrievedChunk {
            text: text.to_string(),
            source: "SRC".to_string(),
            section_hint: None,
            score: 1.0,
        }
    }

    #[test]
    fn test_prompt_embeds_context_then_query() {
        let retrieved = vec![payload("First chunk."), payload("Second chunk.")];
        let prompt = build_prompt("What applies?", &retrieved);

        assert!(prompt.contains("ONLY the context"));
        assert!(prompt.contains("First chunk.\n\nSecond chunk."));
        let context_pos = prompt.find("First chunk.").unwrap();
        let query_pos = prompt.find("What applies?").unwrap();
        assert!(context_pos < query_pos);
    }

    #[test]
    fn test_prompt_with_no_retrieved_chunks_has_empty_context() {
        let prompt = build_prompt("Anything?", &[]);
        assert!(prompt.contains("Context:\n\n"));
        assert!(prompt.contains("Anything?"));
    }

    struct EchoLlm;

    #[async_trait]
    impl LlmClient for EchoLlm {
        async fn generate(&self, prompt: &str) -> crate::types::Result<String> {
            Ok(format!("echo:{prompt}"))
        }

        fn model_name(&self) -> &str {
            "echo"
        }
    }

    struct FailingLlm;

    #[async_trait]
    impl LlmClient for FailingLlm {
        async fn generate(&self, _prompt: &str) -> crate::types::Result<String> {
            Err(AppError::Llm("backend unreachable".to_string()))
        }

        fn model_name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_answer_is_model_output_unmodified() {
        let generator = AnswerGenerator::new(Arc::new(EchoLlm));
        let retrieved = vec![payload("Context text.")];
        let answer = generator.generate_answer("Q?", &retrieved).await.unwrap();
        assert!(answer.starts_with("echo:"));
        assert!(answer.contains("Context text."));
    }

    #[tokio::test]
    async fn test_identical_inputs_yield_identical_answers() {
        let generator = AnswerGenerator::new(Arc::new(EchoLlm));
        let retrieved = vec![payload("Stable context.")];
        let a = generator.generate_answer("Q?", &retrieved).await.unwrap();
        let b = generator.generate_answer("Q?", &retrieved).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_llm_failure_propagates() {
        let generator = AnswerGenerator::new(Arc::new(FailingLlm));
        let result = generator.generate_answer("Q?", &[]).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }
}
