//! Environment-driven configuration.
//!
//! All knobs come from the environment (with `.env` support via dotenvy)
//! so the same binary serves local development and deployment without a
//! config file. Missing values fall back to the defaults the original
//! corpus was built with.

use std::env;
use std::path::PathBuf;

use serde::Deserialize;

use crate::types::{AppError, Result};

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Artifact and source locations.
    pub data: DataConfig,
    /// Language-model provider settings.
    pub llm: LlmConfig,
    /// Retrieval pipeline settings.
    pub rag: RagConfig,
}

/// Locations of the source documents and build artifacts.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory of cleaned `*.txt` source documents.
    pub source_dir: PathBuf,
    /// Corpus artifact path.
    pub corpus_file: PathBuf,
    /// Index artifact path.
    pub index_file: PathBuf,
}

/// Ollama connection and model selection.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the Ollama server.
    pub ollama_url: String,
    /// Generation model name.
    pub model: String,
}

/// Retrieval tunables.
#[derive(Debug, Clone, Deserialize)]
pub struct RagConfig {
    /// Embedding model identifier.
    pub embedding_model: String,
    /// Sentence-window size for window chunks.
    pub window_size: usize,
    /// Default number of chunks to retrieve per query.
    pub top_k: usize,
    /// Similarity metric name, fixed per index build.
    pub metric: String,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if a numeric variable fails to parse.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            data: DataConfig {
                source_dir: env::var("HERA_SOURCE_DIR")
                    .unwrap_or_else(|_| "data/clean".to_string())
                    .into(),
                corpus_file: env::var("HERA_CORPUS_FILE")
                    .unwrap_or_else(|_| "data/corpus.json".to_string())
                    .into(),
                index_file: env::var("HERA_INDEX_FILE")
                    .unwrap_or_else(|_| "data/index.json".to_string())
                    .into(),
            },
            llm: LlmConfig {
                ollama_url: env::var("OLLAMA_URL")
                    .unwrap_or_else(|_| "http://localhost:11434".to_string()),
                model: env::var("HERA_MODEL").unwrap_or_else(|_| "qwen2.5:1.5b".to_string()),
            },
            rag: RagConfig {
                embedding_model: env::var("EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "BAAI/bge-base-en-v1.5".to_string()),
                window_size: parse_env("HERA_WINDOW_SIZE", 3)?,
                top_k: parse_env("HERA_TOP_K", 3)?,
                metric: env::var("HERA_METRIC").unwrap_or_else(|_| "inner_product".to_string()),
            },
        })
    }
}

fn parse_env(name: &str, default: usize) -> Result<usize> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::Config(format!("{name} must be a positive integer, got '{raw}'"))),
        Err(_) => Ok(default),
    }
}
