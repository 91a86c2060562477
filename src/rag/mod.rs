//! Retrieval Augmented Generation (RAG) pipeline.
//!
//! This module holds the core of H.E.R.A: turning regulatory documents
//! into a retrievable corpus and turning questions into grounded,
//! cited answers.
//!
//! # Module Structure
//!
//! - [`chunker`] - Multi-granularity text chunking (paragraph, sentence,
//!   sliding sentence-window)
//! - [`corpus`] - The ordered chunk store and its JSON artifact
//! - [`embeddings`] - Dense embedding capability (fastembed)
//! - [`retriever`] - Query embedding + nearest-neighbor retrieval
//! - [`generator`] - Context-constrained answer generation
//!
//! # Pipeline
//!
//! Build time: documents → chunker → corpus artifact → embeddings →
//! vector index artifact. Query time: question → embedding → index
//! search → ranked chunks → grounded prompt → answer.

pub mod chunker;
pub mod corpus;
pub mod embeddings;
pub mod generator;
pub mod retriever;

pub use chunker::{Chunker, ChunkerConfig};
pub use corpus::Corpus;
pub use embeddings::{Embedder, FastembedEmbedder};
pub use generator::{build_prompt, AnswerGenerator};
pub use retriever::Retriever;
