//! # hera-vector
//!
//! A pure-Rust flat vector index with exact nearest-neighbor search.
//!
//! ## Features
//!
//! - **Pure Rust**: No native dependencies, compiles anywhere Rust does
//! - **Exact search**: Brute-force scan, no recall loss at corpus scale
//! - **Positional identity**: Row *i* of the index corresponds to record
//!   *i* of whatever store the caller pairs it with; this pairing is the
//!   index's core correctness invariant, enforced at build and load time
//! - **Read-only after build**: Concurrent searches need no locking
//! - **Persistence**: JSON artifact with atomic replace-on-write
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hera_vector::{DistanceMetric, FlatIndex};
//!
//! let rows = vec![vec![0.1f32; 768], vec![0.2f32; 768]];
//! let index = FlatIndex::build(768, DistanceMetric::InnerProduct, rows)?;
//!
//! let query = vec![0.1f32; 768];
//! let hits = index.search(&query, 10)?;
//! for hit in hits {
//!     println!("row {} score {}", hit.row, hit.score);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod distance;
pub mod error;
pub mod persistence;

// Re-exports for convenience
pub use distance::DistanceMetric;
pub use error::{Error, Result};
pub use persistence::{load_index, save_index};

/// A single search hit: an index row and its similarity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    /// Zero-based row index into the ordered store the index was built from.
    pub row: usize,
    /// Similarity score under the index's metric (higher is more similar).
    pub score: f32,
}

/// Exact nearest-neighbor index over an ordered set of embedding vectors.
///
/// A `FlatIndex` is built once from the full ordered embedding set and is
/// immutable afterwards. Rebuilding is a separate offline step that fully
/// replaces the artifact; a serving process never mutates a live index.
///
/// # Thread Safety
///
/// All operations take `&self` on immutable data, so a `FlatIndex` can be
/// shared freely (e.g. behind an `Arc`) across concurrently served queries.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dimensions: usize,
    metric: DistanceMetric,
    rows: Vec<Vec<f32>>,
}

impl FlatIndex {
    /// Build an index from the full ordered set of embedding vectors.
    ///
    /// # Errors
    ///
    /// Returns an error if `dimensions` is zero, if any row's length
    /// differs from `dimensions`, or if any row contains a non-finite
    /// component.
    pub fn build(dimensions: usize, metric: DistanceMetric, rows: Vec<Vec<f32>>) -> Result<Self> {
        if dimensions == 0 {
            return Err(Error::InvalidVector("Dimensions must be > 0".to_string()));
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != dimensions {
                return Err(Error::DimensionMismatch {
                    expected: dimensions,
                    actual: row.len(),
                });
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(Error::InvalidVector(format!(
                    "Row {i} contains a non-finite component"
                )));
            }
        }

        tracing::debug!(rows = rows.len(), dimensions, %metric, "Built flat index");

        Ok(Self {
            dimensions,
            metric,
            rows,
        })
    }

    /// Number of rows in the index.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the index contains no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Dimensionality of all row vectors.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// The distance metric fixed at build time.
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Borrow the raw row vectors, in build order.
    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    /// Find the up-to-`k` nearest rows to `query`, best match first.
    ///
    /// If the index holds fewer than `k` rows, all rows are returned with
    /// no padding and no error. Ties break toward the lower row number so
    /// results are deterministic for identical inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if `k == 0` or if the query's dimensionality does
    /// not match the index.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        if k == 0 {
            return Err(Error::InvalidSearch("k must be >= 1".to_string()));
        }
        if query.len() != self.dimensions {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }

        let mut hits: Vec<SearchHit> = self
            .rows
            .iter()
            .enumerate()
            .map(|(row, vector)| SearchHit {
                row,
                score: self.metric.similarity(query, vector),
            })
            .collect();

        hits.sort_unstable_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.row.cmp(&b.row))
        });
        hits.truncate(k);

        Ok(hits)
    }
}
