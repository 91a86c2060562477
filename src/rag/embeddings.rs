//! Dense embedding capability.
//!
//! The [`Embedder`] trait is the capability boundary between the core
//! and the model runtime: text in, fixed-dimension vector out,
//! deterministic for a fixed model version. The production implementation
//! wraps fastembed's ONNX models; tests substitute a fixture embedder.

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use parking_lot::Mutex;
use tracing::info;

use crate::types::{AppError, Result};

/// Maps text to fixed-dimension dense vectors.
///
/// Implementations must be deterministic for a fixed model version:
/// identical input text always yields the same vector, so corpora and
/// query results are reproducible against a previously built index.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts, order-preserving and same-length.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Dimensionality of every vector this embedder produces.
    fn dimensions(&self) -> usize;

    /// The model identifier backing this embedder.
    fn model_name(&self) -> &str;
}

/// Embedder backed by a local fastembed ONNX model.
///
/// Model load failure is a fatal initialization error, not a per-call
/// recoverable one. The fastembed handle requires `&mut` to run
/// inference, so it sits behind a mutex; the guard is held only for the
/// duration of the (CPU-bound) call, never across other awaits.
pub struct FastembedEmbedder {
    model: Mutex<TextEmbedding>,
    model_name: String,
    dimensions: usize,
}

impl FastembedEmbedder {
    /// Load the named embedding model and probe its dimensionality.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] for an unknown model name or a
    /// failed model load.
    pub fn new(model_name: &str) -> Result<Self> {
        let model_kind = match model_name {
            "BAAI/bge-base-en-v1.5" | "BAAI/bge-base-en" => EmbeddingModel::BGEBaseENV15,
            "BAAI/bge-small-en-v1.5" | "BAAI/bge-small-en" => EmbeddingModel::BGESmallENV15,
            "BAAI/bge-large-en-v1.5" => EmbeddingModel::BGELargeENV15,
            "sentence-transformers/all-MiniLM-L6-v2" => EmbeddingModel::AllMiniLML6V2,
            other => {
                return Err(AppError::Config(format!(
                    "Unknown embedding model '{other}'. Supported: BAAI/bge-base-en-v1.5, \
                     BAAI/bge-small-en-v1.5, BAAI/bge-large-en-v1.5, \
                     sentence-transformers/all-MiniLM-L6-v2"
                )))
            }
        };

        let mut model = TextEmbedding::try_new(
            InitOptions::new(model_kind).with_show_download_progress(false),
        )
        .map_err(|e| AppError::Config(format!("Failed to load embedding model '{model_name}': {e}")))?;

        // Probe once; dimensionality is constant for the model version.
        let probe = model
            .embed(vec!["dimension probe"], None)
            .map_err(|e| AppError::Config(format!("Embedding model probe failed: {e}")))?;
        let dimensions = probe
            .first()
            .map(|v| v.len())
            .filter(|&d| d > 0)
            .ok_or_else(|| AppError::Config("Embedding model returned an empty probe vector".to_string()))?;

        info!(model = model_name, dimensions, "Loaded embedding model");

        Ok(Self {
            model: Mutex::new(model),
            model_name: model_name.to_string(),
            dimensions,
        })
    }
}

#[async_trait]
impl Embedder for FastembedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let texts = [text.to_string()];
        let mut vectors = self.embed_batch(&texts).await?;
        vectors
            .pop()
            .ok_or_else(|| AppError::Embedding("Model returned no vector".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let vectors = self
            .model
            .lock()
            .embed(texts.to_vec(), None)
            .map_err(|e| AppError::Embedding(e.to_string()))?;

        if vectors.len() != texts.len() {
            return Err(AppError::Embedding(format!(
                "Model returned {} vectors for {} texts",
                vectors.len(),
                texts.len()
            )));
        }

        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
