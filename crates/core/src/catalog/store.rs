//! In-process catalog store.

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::VideoRecord;

/// Current video list plus the thumbnail filename to remote URL relation.
///
/// Locks are held only for a single read, replace or mirror step. A
/// synchronization racing a batch update can still interleave between steps.
#[derive(Debug, Default)]
pub struct CatalogStore {
    videos: RwLock<Vec<VideoRecord>>,
    thumbnail_sources: RwLock<HashMap<String, String>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current records, in playlist order.
    pub async fn videos(&self) -> Vec<VideoRecord> {
        self.videos.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.videos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.videos.read().await.is_empty()
    }

    /// Replace the whole record list.
    pub async fn replace(&self, videos: Vec<VideoRecord>) {
        *self.videos.write().await = videos;
    }

    /// Mirror a successful remote edit into the first record with this id.
    ///
    /// Returns false when no record matches.
    pub async fn apply_edit(&self, video_id: &str, title: &str, description: &str) -> bool {
        let mut videos = self.videos.write().await;
        match videos.iter_mut().find(|v| v.id == video_id) {
            Some(video) => {
                video.title = title.to_string();
                video.description = description.to_string();
                true
            }
            None => false,
        }
    }

    /// Remember where a derived thumbnail filename can be fetched from.
    pub async fn register_thumbnail(&self, filename: String, remote_url: String) {
        self.thumbnail_sources
            .write()
            .await
            .insert(filename, remote_url);
    }

    /// Replace the whole relation, as a synchronization replaces the videos.
    /// Files already on disk keep being served without it.
    pub async fn replace_thumbnails(&self, relations: Vec<(String, String)>) {
        *self.thumbnail_sources.write().await = relations.into_iter().collect();
    }

    pub async fn thumbnail_source(&self, filename: &str) -> Option<String> {
        self.thumbnail_sources.read().await.get(filename).cloned()
    }
}
