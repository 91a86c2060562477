//! The corpus: the ordered chunk store for one build.
//!
//! The corpus artifact is a plain JSON array of chunk records; its order
//! defines chunk identity for the paired vector index (index row *i*
//! answers for `corpus[i]`). That pairing is validated wherever the two
//! artifacts meet, never assumed.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::types::{AppError, Chunk, Result};

/// The ordered collection of all chunks for one corpus build.
///
/// Immutable after construction; a rebuild produces a whole new corpus.
#[derive(Debug, Clone)]
pub struct Corpus {
    chunks: Vec<Chunk>,
}

impl Corpus {
    /// Wrap an ordered chunk set, validating per-chunk invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Corpus`] if any chunk text is empty or
    /// whitespace-only, or if any id appears twice.
    pub fn new(chunks: Vec<Chunk>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(chunks.len());
        for chunk in &chunks {
            if chunk.text.trim().is_empty() {
                return Err(AppError::Corpus(format!(
                    "Chunk {} has empty or whitespace-only text",
                    chunk.id
                )));
            }
            if !seen.insert(chunk.id) {
                return Err(AppError::Corpus(format!("Duplicate chunk id {}", chunk.id)));
            }
        }

        Ok(Self { chunks })
    }

    /// Number of chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the corpus holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Chunk at position `row`, if in range.
    pub fn get(&self, row: usize) -> Option<&Chunk> {
        self.chunks.get(row)
    }

    /// All chunks in build order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Chunk texts in build order, for batch embedding.
    pub fn texts(&self) -> Vec<String> {
        self.chunks.iter().map(|c| c.text.clone()).collect()
    }

    /// Save the corpus artifact to `path`, replacing atomically.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let json = serde_json::to_string_pretty(&self.chunks)
            .map_err(|e| AppError::Corpus(format!("Failed to serialize corpus: {e}")))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, path).await?;

        info!(chunks = self.len(), path = %path.display(), "Saved corpus");
        Ok(())
    }

    /// Load and validate a corpus artifact from `path`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::Config(format!(
                "Missing or unreadable corpus artifact {}: {e}",
                path.display()
            ))
        })?;
        let chunks: Vec<Chunk> = serde_json::from_str(&json)
            .map_err(|e| AppError::Corpus(format!("Failed to parse corpus artifact: {e}")))?;

        let corpus = Self::new(chunks)?;
        info!(chunks = corpus.len(), path = %path.display(), "Loaded corpus");
        Ok(corpus)
    }
}
