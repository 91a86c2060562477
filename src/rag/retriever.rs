//! Query-time retrieval: embed the query, search the index, map rows
//! back to chunks.

use std::sync::Arc;

use tracing::debug;

use hera_vector::FlatIndex;

use crate::rag::corpus::Corpus;
use crate::rag::embeddings::Embedder;
use crate::types::{AppError, Result, RetrievedChunk};

/// Stateless retrieval over an immutable corpus/index pair.
///
/// Holds only shared read-only state, so one `Retriever` serves any
/// number of concurrent queries. The only blocking work is the embedding
/// call; no lock is held around it.
pub struct Retriever {
    embedder: Arc<dyn Embedder>,
    index: Arc<FlatIndex>,
    corpus: Arc<Corpus>,
}

impl Retriever {
    /// Assemble a retriever, validating the corpus/index pairing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Corpus`] if the index row count differs from
    /// the corpus length, or [`AppError::Config`] if the embedder's
    /// dimensionality does not match the index.
    pub fn new(
        embedder: Arc<dyn Embedder>,
        index: Arc<FlatIndex>,
        corpus: Arc<Corpus>,
    ) -> Result<Self> {
        if index.len() != corpus.len() {
            return Err(AppError::Corpus(format!(
                "Index has {} rows but corpus has {} chunks",
                index.len(),
                corpus.len()
            )));
        }
        if embedder.dimensions() != index.dimensions() {
            return Err(AppError::Config(format!(
                "Embedding model produces {}-dim vectors but index was built with {} dims",
                embedder.dimensions(),
                index.dimensions()
            )));
        }

        Ok(Self {
            embedder,
            index,
            corpus,
        })
    }

    /// Retrieve the up-to-`k` most similar chunks for `query`, best
    /// match first, in the index's returned order (no re-ranking).
    ///
    /// # Errors
    ///
    /// Rejects empty/whitespace queries and `k == 0` as
    /// [`AppError::InvalidInput`] before touching the index; embedding
    /// failures surface as [`AppError::Embedding`].
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<RetrievedChunk>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput("Query must not be empty".to_string()));
        }
        if k == 0 {
            return Err(AppError::InvalidInput("k must be >= 1".to_string()));
        }

        let query_vector = self.embedder.embed(query).await?;
        let hits = self.index.search(&query_vector, k)?;

        debug!(k, hits = hits.len(), "Retrieved chunks");

        hits.into_iter()
            .map(|hit| {
                let chunk = self.corpus.get(hit.row).ok_or_else(|| {
                    AppError::Corpus(format!(
                        "Index returned row {} outside corpus of {} chunks",
                        hit.row,
                        self.corpus.len()
                    ))
                })?;
                Ok(RetrievedChunk {
                    text: chunk.text.clone(),
                    source: chunk.source.clone(),
                    section_hint: chunk.section_hint.clone(),
                    score: hit.score,
                })
            })
            .collect()
    }

    /// Number of chunks in the served corpus.
    pub fn corpus_len(&self) -> usize {
        self.corpus.len()
    }
}
