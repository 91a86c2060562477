//! Offline corpus/index build pipeline.
//!
//! The build is a sequence of independent, idempotent stages that
//! communicate only through file artifacts:
//!
//! 1. **Chunk stage**: read cleaned source documents, chunk them at all
//!    granularities, validate, write the corpus artifact.
//! 2. **Index stage**: load the corpus artifact back (re-validating
//!    it), embed every chunk, build the flat index, write the index
//!    artifact.
//!
//! Each stage validates its input before producing output, and each
//! artifact is written to a temporary file and renamed into place, so a
//! serving process only ever observes complete artifacts. Builds never
//! mutate a live index in place; serving picks up a rebuild by
//! re-initializing from the swapped artifacts.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use hera_vector::{save_index, DistanceMetric, FlatIndex};

use crate::rag::chunker::{Chunker, ChunkerConfig};
use crate::rag::corpus::Corpus;
use crate::rag::embeddings::Embedder;
use crate::types::{AppError, Result};
use crate::utils::Config;

/// Summary of a completed corpus/index build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Number of source documents chunked.
    pub sources: usize,
    /// Total chunks across all granularities.
    pub chunks: usize,
    /// Embedding dimensionality of the built index.
    pub dimensions: usize,
    /// Embedding model used for the build.
    pub embedding_model: String,
}

/// Chunk stage: turn every `*.txt` under `source_dir` into the corpus
/// artifact at `corpus_file`.
///
/// Sources are processed in filename order so repeated builds over the
/// same inputs produce identical artifacts. The file stem becomes the
/// source tag. A source that yields zero chunks is fine; a build where
/// *no* source yields chunks is a fatal corpus error.
pub async fn run_chunk_stage(
    source_dir: &Path,
    corpus_file: &Path,
    chunker_config: ChunkerConfig,
) -> Result<Corpus> {
    let mut entries = Vec::new();
    let mut dir = tokio::fs::read_dir(source_dir).await.map_err(|e| {
        AppError::Config(format!(
            "Cannot read source directory {}: {e}",
            source_dir.display()
        ))
    })?;
    while let Some(entry) = dir.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "txt") {
            entries.push(path);
        }
    }
    entries.sort();

    let mut chunker = Chunker::new(chunker_config)?;
    let mut chunks = Vec::new();
    let mut sources = 0usize;

    for path in &entries {
        let source = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let text = tokio::fs::read_to_string(path).await?;

        let produced = chunker.chunk_source(&source, &text);
        info!(source, chunks = produced.len(), "Chunked source document");
        chunks.extend(produced);
        sources += 1;
    }

    if chunks.is_empty() {
        return Err(AppError::Corpus(format!(
            "Chunk stage produced no chunks from {sources} source(s) in {}",
            source_dir.display()
        )));
    }

    let corpus = Corpus::new(chunks)?;
    corpus.save(corpus_file).await?;
    Ok(corpus)
}

/// Index stage: embed every chunk of the corpus artifact and write the
/// index artifact.
///
/// Loads the corpus back from disk rather than trusting an in-memory
/// value, so the stage validates exactly what the next consumer will
/// read. A row-count mismatch between embeddings and corpus is fatal.
pub async fn run_index_stage(
    corpus_file: &Path,
    index_file: &Path,
    embedder: &dyn Embedder,
    metric: DistanceMetric,
) -> Result<FlatIndex> {
    let corpus = Corpus::load(corpus_file).await?;

    let texts = corpus.texts();
    let vectors = embedder.embed_batch(&texts).await?;

    if vectors.len() != corpus.len() {
        return Err(AppError::Corpus(format!(
            "Embedding produced {} rows for a corpus of {} chunks",
            vectors.len(),
            corpus.len()
        )));
    }

    let index = FlatIndex::build(embedder.dimensions(), metric, vectors)?;
    save_index(index_file, &index).await?;
    Ok(index)
}

/// Run the full build: chunk stage then index stage.
pub async fn build(config: &Config, embedder: Arc<dyn Embedder>) -> Result<BuildReport> {
    let metric = DistanceMetric::from_str(&config.rag.metric)?;
    let chunker_config = ChunkerConfig {
        window_size: config.rag.window_size,
        ..ChunkerConfig::default()
    };

    info!(source_dir = %config.data.source_dir.display(), "Starting corpus build");
    let corpus = run_chunk_stage(
        &config.data.source_dir,
        &config.data.corpus_file,
        chunker_config,
    )
    .await?;

    let index = run_index_stage(
        &config.data.corpus_file,
        &config.data.index_file,
        embedder.as_ref(),
        metric,
    )
    .await?;

    info!(
        chunks = corpus.len(),
        dimensions = index.dimensions(),
        "Corpus build complete"
    );

    Ok(BuildReport {
        sources: count_sources(&corpus),
        chunks: corpus.len(),
        dimensions: index.dimensions(),
        embedding_model: embedder.model_name().to_string(),
    })
}

fn count_sources(corpus: &Corpus) -> usize {
    let mut sources: Vec<&str> = corpus.chunks().iter().map(|c| c.source.as_str()).collect();
    sources.sort_unstable();
    sources.dedup();
    sources.len()
}
