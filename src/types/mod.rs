//! Core types for H.E.R.A: the chunk data model, retrieval payloads, and
//! the application error taxonomy.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============= Chunk Data Model =============

/// Granularity of a retrievable chunk.
///
/// Chunks of different granularities may overlap in content; that overlap
/// is what gives the retriever diversity to choose from. Serialized as
/// `"paragraph"`, `"sentence"`, or `"window{N}"` in the corpus artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkKind {
    /// A blank-line-delimited paragraph, whitespace-normalized.
    Paragraph,
    /// A single sentence split out of a paragraph by the boundary heuristic.
    Sentence,
    /// A sliding window of N consecutive sentences (stride 1).
    Window(usize),
}

impl fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkKind::Paragraph => write!(f, "paragraph"),
            ChunkKind::Sentence => write!(f, "sentence"),
            ChunkKind::Window(n) => write!(f, "window{n}"),
        }
    }
}

impl std::str::FromStr for ChunkKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "paragraph" => Ok(ChunkKind::Paragraph),
            "sentence" => Ok(ChunkKind::Sentence),
            other => {
                if let Some(n) = other.strip_prefix("window") {
                    let n: usize = n
                        .parse()
                        .map_err(|_| AppError::Corpus(format!("Invalid chunk kind: '{other}'")))?;
                    Ok(ChunkKind::Window(n))
                } else {
                    Err(AppError::Corpus(format!("Invalid chunk kind: '{other}'")))
                }
            }
        }
    }
}

impl Serialize for ChunkKind {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ChunkKind {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The atomic retrievable unit: a span of regulatory text with provenance.
///
/// Chunks are created once at corpus-build time and are immutable
/// thereafter; destroying or replacing them requires a full rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique, monotonically assigned id, stable within one corpus build.
    pub id: u64,
    /// Identifier of the originating document (e.g. `HIPAA_PART_164`).
    pub source: String,
    /// Granularity tag.
    #[serde(rename = "type")]
    pub kind: ChunkKind,
    /// Regulatory section reference extracted from the text (e.g.
    /// `164.312`); absent when no section marker was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_hint: Option<String>,
    /// The chunk's literal content; never empty or whitespace-only.
    pub text: String,
}

/// A chunk payload returned from retrieval, with its similarity score.
///
/// Ephemeral and per-query; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    /// The chunk's text, in full.
    pub text: String,
    /// Originating document tag.
    pub source: String,
    /// Section reference, when one was extracted at build time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_hint: Option<String>,
    /// Similarity score under the index's metric (higher is better).
    pub score: f32,
}

// ============= Error Types =============

/// Application-level errors.
///
/// Configuration and corpus-consistency errors are fatal at startup or
/// build time; capability-call errors surface per query and never mutate
/// the corpus or index.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or invalid configuration, or a failed artifact/model load
    /// at initialization. Fatal: the process must not begin serving.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input rejected at the boundary (e.g. empty query, k == 0).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Embedding capability call failed.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Language-model capability call failed.
    #[error("LLM error: {0}")]
    Llm(String),

    /// Corpus consistency violation (row-count mismatch, empty chunk
    /// text, duplicate id). Fatal; never silently truncated.
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Vector index error.
    #[error("Index error: {0}")]
    Index(#[from] hera_vector::Error),

    /// I/O error while reading sources or artifacts.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_kind_display() {
        assert_eq!(ChunkKind::Paragraph.to_string(), "paragraph");
        assert_eq!(ChunkKind::Sentence.to_string(), "sentence");
        assert_eq!(ChunkKind::Window(3).to_string(), "window3");
        assert_eq!(ChunkKind::Window(5).to_string(), "window5");
    }

    #[test]
    fn test_chunk_kind_parse() {
        assert_eq!(
            "paragraph".parse::<ChunkKind>().unwrap(),
            ChunkKind::Paragraph
        );
        assert_eq!("window3".parse::<ChunkKind>().unwrap(), ChunkKind::Window(3));
        assert!("window".parse::<ChunkKind>().is_err());
        assert!("token".parse::<ChunkKind>().is_err());
    }

    #[test]
    fn test_chunk_serializes_to_artifact_schema() {
        let chunk = Chunk {
            id: 7,
            source: "HIPAA_PART_164".to_string(),
            kind: ChunkKind::Window(3),
            section_hint: None,
            text: "Some text.".to_string(),
        };

        let value = serde_json::to_value(&chunk).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["type"], "window3");
        assert_eq!(value["source"], "HIPAA_PART_164");
        // Absent hint is omitted, not null
        assert!(value.get("section_hint").is_none());
    }

    #[test]
    fn test_chunk_round_trips_through_json() {
        let chunk = Chunk {
            id: 1,
            source: "SECURITY_RULE".to_string(),
            kind: ChunkKind::Sentence,
            section_hint: Some("164.312".to_string()),
            text: "Access controls are required.".to_string(),
        };

        let json = serde_json::to_string(&chunk).unwrap();
        let back: Chunk = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chunk);
    }
}
