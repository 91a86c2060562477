//! LLM provider clients.
//!
//! - [`client`] - The [`LlmClient`](client::LlmClient) capability trait
//! - [`ollama`] - Local inference via an Ollama server

pub mod client;
pub mod ollama;

pub use client::LlmClient;
pub use ollama::OllamaClient;
