//! Distance metrics for vector similarity.
//!
//! Provides the metrics used for comparing embedding vectors. A metric is
//! chosen once when an index is built and never mixed across builds.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Distance metric for vector similarity calculations.
///
/// The choice of metric must be consistent with how the embedding model's
/// vectors are meant to be compared:
///
/// - **InnerProduct**: Best for pre-normalized embeddings (most text
///   embedding models ship unit-length vectors, where inner product equals
///   cosine similarity).
/// - **Cosine**: Angle between vectors, ignoring magnitude.
/// - **Euclidean**: Straight-line (L2) distance, where magnitude matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Dot product (inner product). Higher is more similar.
    #[default]
    InnerProduct,

    /// Cosine similarity. Range [-1, 1], 1 means identical direction.
    Cosine,

    /// Euclidean (L2) distance, transformed so higher is more similar.
    Euclidean,
}

impl DistanceMetric {
    /// Compute the similarity score between two vectors.
    ///
    /// Returns a score where **higher is more similar** for all metrics.
    /// For Euclidean this is the transformed score `1 / (1 + dist)`.
    ///
    /// # Panics
    ///
    /// Debug-asserts that vectors have the same length; callers validate
    /// dimensions before reaching this point.
    #[inline]
    pub fn similarity(&self, a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");

        match self {
            DistanceMetric::InnerProduct => dot_product(a, b),
            DistanceMetric::Cosine => cosine_similarity(a, b),
            DistanceMetric::Euclidean => {
                let dist = euclidean_distance(a, b);
                1.0 / (1.0 + dist)
            }
        }
    }

    /// Compute the raw distance between two vectors (lower is more similar).
    #[inline]
    pub fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");

        match self {
            DistanceMetric::InnerProduct => -dot_product(a, b),
            DistanceMetric::Cosine => 1.0 - cosine_similarity(a, b),
            DistanceMetric::Euclidean => euclidean_distance(a, b),
        }
    }

    /// Get the name of this distance metric.
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::InnerProduct => "inner_product",
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::Euclidean => "euclidean",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DistanceMetric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inner_product" | "dot" | "dot_product" | "ip" => Ok(Self::InnerProduct),
            "cosine" => Ok(Self::Cosine),
            "euclidean" | "l2" => Ok(Self::Euclidean),
            other => Err(Error::UnknownMetric(other.to_string())),
        }
    }
}

/// Dot product of two vectors.
#[inline]
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Cosine similarity of two vectors. Returns 0.0 for zero-magnitude inputs.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot = dot_product(a, b);
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Euclidean (L2) distance between two vectors.
#[inline]
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}
