//! JSON backup of the catalog.

use std::path::Path;

use tracing::{info, warn};

use super::{BackupError, CatalogStore, VideoRecord};

/// Pretty-printed JSON (2-space indent, non-ASCII kept as-is).
pub fn to_json(videos: &[VideoRecord]) -> Result<String, BackupError> {
    serde_json::to_string_pretty(videos).map_err(|e| BackupError::Parse(e.to_string()))
}

/// Write the store's records to `path`, overwriting any existing file.
pub async fn save(store: &CatalogStore, path: &Path) -> Result<usize, BackupError> {
    let videos = store.videos().await;
    let json = to_json(&videos)?;

    tokio::fs::write(path, json).await?;
    info!("Saved {} videos to {:?}", videos.len(), path);

    Ok(videos.len())
}

/// Replace the store's records with the contents of `path`.
///
/// The store is left untouched when the file is missing or malformed.
pub async fn load(store: &CatalogStore, path: &Path) -> Result<Vec<VideoRecord>, BackupError> {
    if !tokio::fs::try_exists(path).await? {
        return Err(BackupError::NotFound(path.display().to_string()));
    }

    let contents = tokio::fs::read_to_string(path).await?;
    let videos: Vec<VideoRecord> = serde_json::from_str(&contents).map_err(|e| {
        warn!("Backup file {:?} is malformed: {}", path, e);
        BackupError::Parse(e.to_string())
    })?;

    store.replace(videos.clone()).await;
    info!("Loaded {} videos from {:?}", videos.len(), path);

    Ok(videos)
}
