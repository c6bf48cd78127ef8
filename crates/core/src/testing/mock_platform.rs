//! Mock video platform for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::platform::{
    ChannelSelector, PlatformError, PlaylistItem, PlaylistPage, SnippetUpdate, VideoPlatform,
};

/// A recorded platform call for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedPlatformCall {
    UploadsPlaylist {
        channel: ChannelSelector,
    },
    PlaylistPage {
        playlist_id: String,
        max_results: u32,
        page_token: Option<String>,
    },
    UpdateSnippet {
        video_id: String,
        update: SnippetUpdate,
    },
}

/// Mock implementation of the VideoPlatform trait.
///
/// Provides controllable behavior for testing:
/// - Serve configured playlists in pages, honoring `max_results`
/// - Reject snippet updates for chosen videos
/// - Track calls for assertions
/// - Simulate failures
///
/// # Example
///
/// ```rust,ignore
/// use tubedesk_core::testing::{MockVideoPlatform, fixtures};
///
/// let platform = MockVideoPlatform::new();
/// platform.set_uploads(ChannelSelector::Mine, "UUmine").await;
/// platform.set_playlist("UUmine", vec![fixtures::playlist_item("v1", "First")]).await;
/// ```
#[derive(Debug, Default)]
pub struct MockVideoPlatform {
    /// Uploads playlist id per channel.
    uploads: Arc<RwLock<HashMap<String, String>>>,
    /// Playlist contents by playlist id.
    playlists: Arc<RwLock<HashMap<String, Vec<PlaylistItem>>>>,
    /// Videos whose snippet updates are rejected.
    failing_updates: Arc<RwLock<HashSet<String>>>,
    /// Serve every remaining item in one page regardless of `max_results`.
    ignore_page_size: Arc<RwLock<bool>>,
    /// Recorded calls.
    calls: Arc<RwLock<Vec<RecordedPlatformCall>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<PlatformError>>>,
}

fn channel_key(channel: &ChannelSelector) -> String {
    match channel {
        ChannelSelector::Mine => "@mine".to_string(),
        ChannelSelector::Id(id) => id.clone(),
    }
}

impl MockVideoPlatform {
    /// Create a new empty mock platform.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Set the uploads playlist of a channel.
    pub async fn set_uploads(&self, channel: ChannelSelector, playlist_id: &str) {
        self.uploads
            .write()
            .await
            .insert(channel_key(&channel), playlist_id.to_string());
    }

    /// Set the full contents of a playlist.
    pub async fn set_playlist(&self, playlist_id: &str, items: Vec<PlaylistItem>) {
        self.playlists
            .write()
            .await
            .insert(playlist_id.to_string(), items);
    }

    /// Reject snippet updates for this video.
    pub async fn fail_updates_for(&self, video_id: &str) {
        self.failing_updates
            .write()
            .await
            .insert(video_id.to_string());
    }

    /// Return oversized pages, ignoring the requested page size.
    pub async fn ignore_page_size(&self, ignore: bool) {
        *self.ignore_page_size.write().await = ignore;
    }

    /// Make the next operation fail with the given error.
    pub async fn fail_next(&self, error: PlatformError) {
        *self.next_error.write().await = Some(error);
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// All recorded calls, in order.
    pub async fn calls(&self) -> Vec<RecordedPlatformCall> {
        self.calls.read().await.clone()
    }

    /// Snippet updates that were sent, successful or not.
    pub async fn snippet_updates(&self) -> Vec<(String, SnippetUpdate)> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|call| match call {
                RecordedPlatformCall::UpdateSnippet { video_id, update } => {
                    Some((video_id.clone(), update.clone()))
                }
                _ => None,
            })
            .collect()
    }

    /// Clear recorded calls.
    pub async fn clear_calls(&self) {
        self.calls.write().await.clear();
    }

    async fn record(&self, call: RecordedPlatformCall) -> Result<(), PlatformError> {
        self.calls.write().await.push(call);
        match self.next_error.write().await.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl VideoPlatform for MockVideoPlatform {
    async fn uploads_playlist(
        &self,
        channel: &ChannelSelector,
    ) -> Result<Option<String>, PlatformError> {
        self.record(RecordedPlatformCall::UploadsPlaylist {
            channel: channel.clone(),
        })
        .await?;

        Ok(self.uploads.read().await.get(&channel_key(channel)).cloned())
    }

    async fn playlist_page(
        &self,
        playlist_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> Result<PlaylistPage, PlatformError> {
        self.record(RecordedPlatformCall::PlaylistPage {
            playlist_id: playlist_id.to_string(),
            max_results,
            page_token: page_token.map(String::from),
        })
        .await?;

        let playlists = self.playlists.read().await;
        let items = playlists
            .get(playlist_id)
            .ok_or_else(|| PlatformError::NotFound(format!("playlist {}", playlist_id)))?;

        // Page tokens are plain offsets.
        let offset = match page_token {
            Some(token) => token.parse::<usize>().map_err(|_| PlatformError::ApiError {
                status: 400,
                message: format!("invalid page token {}", token),
            })?,
            None => 0,
        };

        let end = if *self.ignore_page_size.read().await {
            items.len()
        } else {
            (offset + max_results as usize).min(items.len())
        };
        let start = offset.min(end);

        Ok(PlaylistPage {
            items: items[start..end].to_vec(),
            next_page_token: (end < items.len()).then(|| end.to_string()),
        })
    }

    async fn update_video_snippet(
        &self,
        video_id: &str,
        update: &SnippetUpdate,
    ) -> Result<(), PlatformError> {
        self.record(RecordedPlatformCall::UpdateSnippet {
            video_id: video_id.to_string(),
            update: update.clone(),
        })
        .await?;

        if self.failing_updates.read().await.contains(video_id) {
            return Err(PlatformError::ApiError {
                status: 403,
                message: format!("forbidden: {}", video_id),
            });
        }
        Ok(())
    }
}
