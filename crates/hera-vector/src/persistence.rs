//! Persistence layer for hera-vector.
//!
//! Saves and loads a [`FlatIndex`](crate::FlatIndex) as a single JSON
//! artifact. Writes go to a temporary sibling file first and are renamed
//! into place, so a concurrently serving process either sees the old
//! artifact or the new one, never a partial write.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::distance::DistanceMetric;
use crate::error::{Error, Result};
use crate::FlatIndex;

/// On-disk representation of a flat index.
#[derive(Debug, Serialize, Deserialize)]
struct StoredIndex {
    metric: DistanceMetric,
    dimensions: usize,
    built_at: DateTime<Utc>,
    rows: Vec<Vec<f32>>,
}

/// Save an index to `path`, replacing any existing artifact atomically.
pub async fn save_index(path: impl AsRef<Path>, index: &FlatIndex) -> Result<()> {
    let path = path.as_ref();

    let stored = StoredIndex {
        metric: index.metric(),
        dimensions: index.dimensions(),
        built_at: Utc::now(),
        rows: index.rows().to_vec(),
    };

    let json = serde_json::to_string(&stored)
        .map_err(|e| Error::Persistence(format!("Failed to serialize index: {e}")))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;

    info!(rows = stored.rows.len(), dimensions = stored.dimensions, path = %path.display(), "Saved index");
    Ok(())
}

/// Load an index from `path`, re-validating its shape on the way in.
pub async fn load_index(path: impl AsRef<Path>) -> Result<FlatIndex> {
    let path = path.as_ref();

    let json = tokio::fs::read_to_string(path).await?;
    let stored: StoredIndex = serde_json::from_str(&json)
        .map_err(|e| Error::Persistence(format!("Failed to parse index artifact: {e}")))?;

    // FlatIndex::build re-checks row dimensions, so a hand-edited or
    // truncated artifact fails loudly here rather than at query time.
    let index = FlatIndex::build(stored.dimensions, stored.metric, stored.rows)?;

    info!(rows = index.len(), dimensions = index.dimensions(), path = %path.display(), "Loaded index");
    Ok(index)
}
