//! # H.E.R.A - HIPAA Evidence Retrieval Assistant
//!
//! Retrieval-augmented question answering over HIPAA regulatory text.
//! Documents are chunked at multiple granularities (paragraph, sentence,
//! sliding sentence-window), embedded, and indexed; at query time the
//! top-k most similar chunks ground a language model's cited answer.
//!
//! ## Overview
//!
//! H.E.R.A can be used in two ways:
//!
//! 1. **As a CLI** - Run the `hera-server` binary (`build`, `search`,
//!    `ask` subcommands)
//! 2. **As a library** - Import the pipeline into your own Rust project
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use hera::{AppState, Config, FastembedEmbedder, OllamaClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!
//!     let embedder = Arc::new(FastembedEmbedder::new(&config.rag.embedding_model)?);
//!     let llm = Arc::new(OllamaClient::new(&config.llm.ollama_url, config.llm.model.clone()));
//!
//!     // Loads corpus + index together and validates their pairing
//!     let state = AppState::init(config, embedder, llm).await?;
//!
//!     let retrieved = state.retriever.search("When does minimum necessary not apply?", 3).await?;
//!     let answer = state.generator.generate_answer("When does minimum necessary not apply?", &retrieved).await?;
//!     println!("{answer}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`rag`] - Chunking, corpus, embeddings, retrieval, generation
//! - [`llm`] - LLM provider clients (Ollama)
//! - [`pipeline`] - Offline corpus/index build stages
//! - [`cli`] - Command-line interface
//! - [`types`] - Data model and error handling
//! - [`utils`] - Configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// Command-line interface definitions and output helpers.
pub mod cli;
/// LLM provider clients and abstractions.
pub mod llm;
/// Offline corpus/index build pipeline.
pub mod pipeline;
/// Retrieval Augmented Generation components.
pub mod rag;
/// Core types (chunks, retrieval payloads, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use llm::{LlmClient, OllamaClient};
pub use rag::{AnswerGenerator, Chunker, ChunkerConfig, Corpus, Embedder, FastembedEmbedder, Retriever};
pub use types::{AppError, Chunk, ChunkKind, Result, RetrievedChunk};
pub use utils::Config;

use std::sync::Arc;

use tracing::info;

/// Process-wide serving state, initialized once at startup.
///
/// `init` loads the corpus and index artifacts together and validates
/// the cross-artifact invariants (row-count pairing, embedding
/// dimensionality) before any query is accepted. A failed validation is
/// fatal; there is no partial-service mode. After `init` everything here
/// is read-only, so the state can be shared across concurrently served
/// queries without locking.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Query-time retrieval over the loaded corpus/index pair.
    pub retriever: Arc<Retriever>,
    /// Grounded answer generation.
    pub generator: Arc<AnswerGenerator>,
}

impl AppState {
    /// Load and validate all serving artifacts, failing fast on any
    /// inconsistency.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] for missing artifacts or a
    /// dimension mismatch, and [`AppError::Corpus`] for a row-count
    /// mismatch between index and corpus.
    pub async fn init(
        config: Config,
        embedder: Arc<dyn Embedder>,
        llm: Arc<dyn LlmClient>,
    ) -> Result<Self> {
        let corpus = Arc::new(Corpus::load(&config.data.corpus_file).await?);
        let index = Arc::new(
            hera_vector::load_index(&config.data.index_file)
                .await
                .map_err(|e| {
                    AppError::Config(format!(
                        "Missing or invalid index artifact {}: {e}",
                        config.data.index_file.display()
                    ))
                })?,
        );

        let retriever = Arc::new(Retriever::new(embedder, index, corpus)?);
        let generator = Arc::new(AnswerGenerator::new(llm));

        info!(chunks = retriever.corpus_len(), "Serving state initialized");

        Ok(Self {
            config: Arc::new(config),
            retriever,
            generator,
        })
    }

    /// Release the serving state.
    pub fn shutdown(self) {
        info!("Serving state shut down");
    }
}
