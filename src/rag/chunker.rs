//! Multi-granularity text chunking for corpus builds.
//!
//! Each source document is split three ways: blank-line paragraphs,
//! heuristic sentences, and sliding windows of consecutive sentences.
//! The granularities deliberately overlap in content; retrieval benefits
//! from having both narrow and wide spans of the same passage to match
//! against.
//!
//! The splitting heuristics are pure functions with their configuration
//! (terminator set, section-marker pattern) exposed as parameters, so
//! they can be unit tested without the rest of the pipeline.

use regex::Regex;
use tracing::debug;

use crate::types::{AppError, Chunk, ChunkKind, Result};

/// Default sentence-ending punctuation, including full-width equivalents.
pub const DEFAULT_TERMINATORS: &[char] = &['.', '!', '?', '\u{3002}', '\u{FF01}', '\u{FF1F}'];

/// Default pattern for regulatory section references: a section marker
/// (`§` or `§§`) followed by a `part.section` identifier.
pub const DEFAULT_SECTION_PATTERN: &str = r"§§?\s*(\d+\.\d+)";

/// Configuration for the [`Chunker`].
#[derive(Debug, Clone)]
pub struct ChunkerConfig {
    /// Sliding-window size in sentences (stride is always 1).
    pub window_size: usize,
    /// Characters treated as sentence terminators when followed by
    /// whitespace.
    pub sentence_terminators: Vec<char>,
    /// Regex with one capture group extracting the section identifier.
    pub section_pattern: String,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            window_size: 3,
            sentence_terminators: DEFAULT_TERMINATORS.to_vec(),
            section_pattern: DEFAULT_SECTION_PATTERN.to_string(),
        }
    }
}

/// Converts raw document text into overlapping, multi-granularity chunks
/// with provenance metadata.
///
/// One `Chunker` is used per corpus build: the id counter is shared
/// across all sources and granularities, which is what guarantees global
/// id uniqueness across the corpus.
pub struct Chunker {
    config: ChunkerConfig,
    section_re: Regex,
    next_id: u64,
}

impl Chunker {
    /// Create a chunker for one corpus build.
    ///
    /// # Errors
    ///
    /// Returns a [`AppError::Config`] if the section pattern is not a
    /// valid regex.
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        let section_re = Regex::new(&config.section_pattern)
            .map_err(|e| AppError::Config(format!("Invalid section pattern: {e}")))?;

        Ok(Self {
            config,
            section_re,
            next_id: 0,
        })
    }

    /// Chunk a single source document at all three granularities.
    ///
    /// A source with zero paragraphs yields zero chunks of any kind; a
    /// source with fewer sentences than the window size yields zero
    /// window chunks. Neither is an error.
    pub fn chunk_source(&mut self, source: &str, text: &str) -> Vec<Chunk> {
        let paragraphs = split_paragraphs(text);

        let mut chunks = Vec::new();
        let mut sentences = Vec::new();

        for paragraph in &paragraphs {
            chunks.push(self.make_chunk(source, ChunkKind::Paragraph, paragraph.clone()));

            for sentence in split_sentences(paragraph, &self.config.sentence_terminators) {
                chunks.push(self.make_chunk(source, ChunkKind::Sentence, sentence.clone()));
                sentences.push(sentence);
            }
        }

        let w = self.config.window_size;
        if w > 0 && sentences.len() >= w {
            for window in sentences.windows(w) {
                chunks.push(self.make_chunk(source, ChunkKind::Window(w), window.join(" ")));
            }
        }

        debug!(
            source,
            paragraphs = paragraphs.len(),
            sentences = sentences.len(),
            chunks = chunks.len(),
            "Chunked source"
        );

        chunks
    }

    /// Extract a section reference from chunk text, if present.
    pub fn section_hint(&self, text: &str) -> Option<String> {
        self.section_re
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Number of ids assigned so far in this build.
    pub fn assigned(&self) -> u64 {
        self.next_id
    }

    fn make_chunk(&mut self, source: &str, kind: ChunkKind, text: String) -> Chunk {
        let id = self.next_id;
        self.next_id += 1;

        Chunk {
            id,
            source: source.to_string(),
            kind,
            section_hint: self.section_hint(&text),
            text,
        }
    }
}

/// Split text into whitespace-normalized paragraphs at blank-line
/// boundaries. Each non-empty run of consecutive non-blank lines becomes
/// one paragraph with its internal whitespace collapsed to single spaces.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut run: Vec<&str> = Vec::new();

    let flush = |run: &mut Vec<&str>, out: &mut Vec<String>| {
        if !run.is_empty() {
            let normalized = run
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            if !normalized.is_empty() {
                out.push(normalized);
            }
            run.clear();
        }
    };

    for line in text.lines() {
        if line.trim().is_empty() {
            flush(&mut run, &mut paragraphs);
        } else {
            run.push(line);
        }
    }
    flush(&mut run, &mut paragraphs);

    paragraphs
}

/// Split a paragraph into sentences.
///
/// A split point is a terminator character followed by whitespace. This
/// is a boundary heuristic, not a natural-language segmenter: splits
/// after abbreviations are accepted noise, and decimals like `164.312`
/// stay intact because no whitespace follows the dot.
pub fn split_sentences(text: &str, terminators: &[char]) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;

    for i in 0..chars.len() {
        let (pos, c) = chars[i];
        if !terminators.contains(&c) {
            continue;
        }
        let followed_by_ws = chars
            .get(i + 1)
            .map(|&(_, next)| next.is_whitespace())
            .unwrap_or(false);
        if followed_by_ws {
            let end = pos + c.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = end;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}
