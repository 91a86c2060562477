//! Ollama-backed LLM client.
//!
//! Local inference keeps regulatory queries on-box; no text leaves the
//! machine. Decoding options are pinned for determinism: temperature 0
//! (greedy) and a bounded completion length.

use async_trait::async_trait;
use ollama_rs::{
    generation::chat::{request::ChatMessageRequest, ChatMessage},
    models::ModelOptions,
    Ollama,
};

use crate::llm::client::LlmClient;
use crate::types::{AppError, Result};

/// Maximum tokens generated per answer.
const NUM_PREDICT: i32 = 512;

/// Client for a local Ollama server.
pub struct OllamaClient {
    client: Ollama,
    model: String,
}

impl OllamaClient {
    /// Create a client for the Ollama server at `base_url`, generating
    /// with `model`.
    pub fn new(base_url: &str, model: String) -> Self {
        let (host, port) = parse_base_url(base_url);
        Self {
            client: Ollama::new(host, port),
            model,
        }
    }
}

/// Split a base URL like `http://localhost:11434` into host and port,
/// defaulting to `localhost:11434` for anything unparseable.
fn parse_base_url(base_url: &str) -> (String, u16) {
    let url_parts: Vec<&str> = base_url.split("://").collect();
    if url_parts.len() == 2 {
        let host_port: Vec<&str> = url_parts[1].split(':').collect();
        let host = host_port[0].to_string();
        let port = if host_port.len() == 2 {
            host_port[1].parse().unwrap_or(11434)
        } else {
            11434
        };
        (host, port)
    } else {
        ("localhost".to_string(), 11434)
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let messages = vec![ChatMessage::user(prompt.to_string())];

        // Temperature 0 pins decoding to the most likely token; the same
        // (prompt, model version) pair must produce the same answer.
        let options = ModelOptions::default()
            .temperature(0.0)
            .num_predict(NUM_PREDICT);

        let request = ChatMessageRequest::new(self.model.clone(), messages).options(options);

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| AppError::Llm(format!("Ollama error: {e}")))?;

        Ok(response.message.content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
