//! Channel uploads synchronization.
//!
//! Walks the uploads playlist page by page, turns each entry into a
//! [`VideoRecord`] and replaces the catalog with the result.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{CatalogStore, ThumbnailVariant, VideoRecord};
use crate::platform::{ChannelSelector, PlatformError, PlaylistItem, VideoPlatform};

/// Route prefix under which cached thumbnails are served.
pub const THUMBNAIL_ROUTE_PREFIX: &str = "/thumbnail/";

/// Preferred thumbnail sizes for `thumbnail_url`, best first.
const THUMBNAIL_PRIORITY: [&str; 4] = ["medium", "high", "default", "standard"];

const UNKNOWN_PRIVACY: &str = "unknown";

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Channel has no accessible uploads playlist: {0}")]
    ChannelNotFound(String),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Problems with a single playlist entry; the entry is skipped.
#[derive(Debug, Error)]
enum ItemError {
    #[error("thumbnail '{size}' has no dimensions")]
    ThumbnailDimensions { size: String },
}

/// Deterministic cache filename for one thumbnail size of a video.
pub fn thumbnail_filename(video_id: &str, size: &str, width: u32, height: u32) -> String {
    format!("{}_{}_{}_{}.jpg", video_id, size, width, height)
}

pub struct VideoSynchronizer {
    platform: Arc<dyn VideoPlatform>,
    store: Arc<CatalogStore>,
    page_size: u32,
}

impl VideoSynchronizer {
    pub fn new(platform: Arc<dyn VideoPlatform>, store: Arc<CatalogStore>, page_size: u32) -> Self {
        Self {
            platform,
            store,
            page_size: page_size.max(1),
        }
    }

    /// Fetch up to `max_results` uploads of a channel (the authenticated
    /// user's own channel when `channel_id` is `None`) and replace the catalog.
    ///
    /// On error the catalog is left as it was.
    pub async fn sync(
        &self,
        channel_id: Option<&str>,
        max_results: u32,
    ) -> Result<Vec<VideoRecord>, SyncError> {
        let selector = ChannelSelector::from_option(channel_id);
        let playlist_id = self
            .platform
            .uploads_playlist(&selector)
            .await?
            .ok_or_else(|| SyncError::ChannelNotFound(describe(&selector)))?;

        let items = self.collect_items(&playlist_id, max_results).await?;

        let mut videos = Vec::with_capacity(items.len());
        let mut relations = Vec::new();
        for item in &items {
            let Some(video_id) = item.video_id() else {
                debug!("Skipping playlist entry without a video id");
                continue;
            };

            match build_record(video_id, item) {
                Ok((record, item_relations)) => {
                    videos.push(record);
                    relations.extend(item_relations);
                }
                Err(e) => warn!("Error processing video {}: {}", video_id, e),
            }
        }

        self.store.replace_thumbnails(relations).await;
        self.store.replace(videos.clone()).await;

        info!(
            "Synchronized {} videos from playlist {} ({} entries fetched)",
            videos.len(),
            playlist_id,
            items.len()
        );

        Ok(videos)
    }

    async fn collect_items(
        &self,
        playlist_id: &str,
        max_results: u32,
    ) -> Result<Vec<PlaylistItem>, PlatformError> {
        let max_results = max_results as usize;
        let mut items: Vec<PlaylistItem> = Vec::new();
        let mut page_token: Option<String> = None;

        while items.len() < max_results {
            let remaining = (max_results - items.len()) as u32;
            let page = self
                .platform
                .playlist_page(playlist_id, remaining.min(self.page_size), page_token.as_deref())
                .await?;

            let fetched = page.items.len();
            items.extend(page.items);

            page_token = page.next_page_token;
            if page_token.is_none() || fetched == 0 {
                break;
            }
        }

        items.truncate(max_results);
        Ok(items)
    }
}

fn describe(selector: &ChannelSelector) -> String {
    match selector {
        ChannelSelector::Mine => "authenticated user's channel".to_string(),
        ChannelSelector::Id(id) => id.clone(),
    }
}

type ThumbnailRelation = (String, String);

fn build_record(
    video_id: &str,
    item: &PlaylistItem,
) -> Result<(VideoRecord, Vec<ThumbnailRelation>), ItemError> {
    let snippet = item.snippet.clone().unwrap_or_default();

    let mut thumbnails = BTreeMap::new();
    let mut relations = Vec::with_capacity(snippet.thumbnails.len());
    for (size, remote) in &snippet.thumbnails {
        let (Some(width), Some(height)) = (remote.width, remote.height) else {
            return Err(ItemError::ThumbnailDimensions { size: size.clone() });
        };

        let filename = thumbnail_filename(video_id, size, width, height);
        thumbnails.insert(
            size.clone(),
            ThumbnailVariant {
                url: format!("{}{}", THUMBNAIL_ROUTE_PREFIX, filename),
                width,
                height,
            },
        );
        relations.push((filename, remote.url.clone()));
    }

    let thumbnail_url = THUMBNAIL_PRIORITY
        .iter()
        .find_map(|size| thumbnails.get(*size))
        .map(|variant| variant.url.clone())
        .unwrap_or_default();

    let privacy_status = item
        .status
        .as_ref()
        .and_then(|s| s.privacy_status.clone())
        .unwrap_or_else(|| UNKNOWN_PRIVACY.to_string());

    let record = VideoRecord {
        id: video_id.to_string(),
        title: snippet.title,
        description: snippet.description,
        thumbnail_url,
        thumbnails,
        published_at: snippet.published_at,
        privacy_status,
    };

    Ok((record, relations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::RemoteThumbnail;
    use crate::testing::{fixtures, MockVideoPlatform, RecordedPlatformCall};

    fn synchronizer(platform: &Arc<MockVideoPlatform>, store: &Arc<CatalogStore>) -> VideoSynchronizer {
        VideoSynchronizer::new(
            Arc::clone(platform) as Arc<dyn VideoPlatform>,
            Arc::clone(store),
            50,
        )
    }

    async fn platform_with_items(items: Vec<PlaylistItem>) -> Arc<MockVideoPlatform> {
        let platform = Arc::new(MockVideoPlatform::new());
        platform.set_uploads(ChannelSelector::Mine, "UUmine").await;
        platform.set_playlist("UUmine", items).await;
        platform
    }

    #[test]
    fn test_thumbnail_filename() {
        assert_eq!(
            thumbnail_filename("abc123", "medium", 320, 180),
            "abc123_medium_320_180.jpg"
        );
    }

    #[tokio::test]
    async fn test_skips_entries_without_video_id() {
        let platform = platform_with_items(vec![
            fixtures::playlist_item("v1", "First"),
            fixtures::playlist_item_without_video_id("Deleted video"),
            fixtures::playlist_item("v3", "Third"),
        ])
        .await;
        let store = Arc::new(CatalogStore::new());

        let videos = synchronizer(&platform, &store).sync(None, 200).await.unwrap();

        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].id, "v1");
        assert_eq!(videos[1].id, "v3");
        assert_eq!(store.videos().await, videos);
    }

    #[tokio::test]
    async fn test_record_fields() {
        let platform = platform_with_items(vec![fixtures::playlist_item("v1", "First")]).await;
        let store = Arc::new(CatalogStore::new());

        let videos = synchronizer(&platform, &store).sync(None, 200).await.unwrap();
        let video = &videos[0];

        assert_eq!(video.title, "First");
        assert_eq!(video.description, "Description of First");
        assert_eq!(video.privacy_status, "public");
        assert_eq!(video.published_at, "2024-01-15T12:00:00Z");
        assert_eq!(video.thumbnail_url, "/thumbnail/v1_medium_320_180.jpg");
        assert_eq!(video.thumbnails.len(), 3);
        assert_eq!(video.thumbnails["high"].url, "/thumbnail/v1_high_480_360.jpg");
        assert_eq!(video.thumbnails["high"].width, 480);
    }

    #[tokio::test]
    async fn test_thumbnail_relations_registered() {
        let platform = platform_with_items(vec![fixtures::playlist_item("v1", "First")]).await;
        let store = Arc::new(CatalogStore::new());

        synchronizer(&platform, &store).sync(None, 200).await.unwrap();

        assert_eq!(
            store.thumbnail_source("v1_default_120_90.jpg").await.as_deref(),
            Some("https://i.ytimg.com/vi/v1/default.jpg")
        );
        assert!(store.thumbnail_source("v1_medium_320_180.jpg").await.is_some());
        assert!(store.thumbnail_source("v1_high_480_360.jpg").await.is_some());
    }

    #[tokio::test]
    async fn test_resync_drops_stale_thumbnail_relations() {
        let platform = platform_with_items(vec![fixtures::playlist_item("v1", "First")]).await;
        let store = Arc::new(CatalogStore::new());
        let sync = synchronizer(&platform, &store);
        sync.sync(None, 200).await.unwrap();

        platform
            .set_playlist("UUmine", vec![fixtures::playlist_item("v2", "Second")])
            .await;
        sync.sync(None, 200).await.unwrap();

        assert!(store.thumbnail_source("v1_medium_320_180.jpg").await.is_none());
        assert!(store.thumbnail_source("v2_medium_320_180.jpg").await.is_some());
    }

    #[tokio::test]
    async fn test_thumbnail_priority_fallback() {
        let mut only_default = fixtures::playlist_item("v1", "A");
        only_default
            .snippet
            .as_mut()
            .unwrap()
            .thumbnails
            .retain(|size, _| size == "default");

        let mut only_standard = fixtures::playlist_item("v2", "B");
        let snippet = only_standard.snippet.as_mut().unwrap();
        snippet.thumbnails.clear();
        snippet.thumbnails.insert(
            "standard".to_string(),
            RemoteThumbnail {
                url: "https://i.ytimg.com/vi/v2/sddefault.jpg".to_string(),
                width: Some(640),
                height: Some(480),
            },
        );
        snippet.thumbnails.insert(
            "maxres".to_string(),
            RemoteThumbnail {
                url: "https://i.ytimg.com/vi/v2/maxresdefault.jpg".to_string(),
                width: Some(1280),
                height: Some(720),
            },
        );

        let mut none = fixtures::playlist_item("v3", "C");
        none.snippet.as_mut().unwrap().thumbnails.clear();

        let platform = platform_with_items(vec![only_default, only_standard, none]).await;
        let store = Arc::new(CatalogStore::new());
        let videos = synchronizer(&platform, &store).sync(None, 200).await.unwrap();

        assert_eq!(videos[0].thumbnail_url, "/thumbnail/v1_default_120_90.jpg");
        assert_eq!(videos[1].thumbnail_url, "/thumbnail/v2_standard_640_480.jpg");
        assert_eq!(videos[2].thumbnail_url, "");
        for video in &videos {
            assert!(video.thumbnail_url.is_empty() || video.thumbnail_url.starts_with("/thumbnail/"));
        }
    }

    #[tokio::test]
    async fn test_missing_privacy_status_defaults_to_unknown() {
        let mut item = fixtures::playlist_item("v1", "A");
        item.status = None;
        let platform = platform_with_items(vec![item]).await;
        let store = Arc::new(CatalogStore::new());

        let videos = synchronizer(&platform, &store).sync(None, 200).await.unwrap();
        assert_eq!(videos[0].privacy_status, "unknown");
    }

    #[tokio::test]
    async fn test_malformed_item_skipped_sync_continues() {
        let mut broken = fixtures::playlist_item("v2", "Broken");
        broken
            .snippet
            .as_mut()
            .unwrap()
            .thumbnails
            .get_mut("default")
            .unwrap()
            .width = None;

        let platform = platform_with_items(vec![
            fixtures::playlist_item("v1", "A"),
            broken,
            fixtures::playlist_item("v3", "C"),
        ])
        .await;
        let store = Arc::new(CatalogStore::new());

        let videos = synchronizer(&platform, &store).sync(None, 200).await.unwrap();
        let ids: Vec<_> = videos.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["v1", "v3"]);
    }

    #[tokio::test]
    async fn test_paginates_in_pages_of_at_most_50() {
        let items = (0..120)
            .map(|i| fixtures::playlist_item(&format!("v{}", i), &format!("Video {}", i)))
            .collect();
        let platform = platform_with_items(items).await;
        let store = Arc::new(CatalogStore::new());

        let videos = synchronizer(&platform, &store).sync(None, 200).await.unwrap();
        assert_eq!(videos.len(), 120);
        assert_eq!(videos[119].id, "v119");

        let page_sizes: Vec<u32> = platform
            .calls()
            .await
            .into_iter()
            .filter_map(|call| match call {
                RecordedPlatformCall::PlaylistPage { max_results, .. } => Some(max_results),
                _ => None,
            })
            .collect();
        assert_eq!(page_sizes, vec![50, 50, 50]);
    }

    #[tokio::test]
    async fn test_never_exceeds_max_results() {
        let items = (0..120)
            .map(|i| fixtures::playlist_item(&format!("v{}", i), "x"))
            .collect();
        let platform = platform_with_items(items).await;
        let store = Arc::new(CatalogStore::new());

        let videos = synchronizer(&platform, &store).sync(None, 70).await.unwrap();
        assert_eq!(videos.len(), 70);

        let page_sizes: Vec<u32> = platform
            .calls()
            .await
            .into_iter()
            .filter_map(|call| match call {
                RecordedPlatformCall::PlaylistPage { max_results, .. } => Some(max_results),
                _ => None,
            })
            .collect();
        assert_eq!(page_sizes, vec![50, 20]);
    }

    #[tokio::test]
    async fn test_oversized_page_is_truncated() {
        let items = (0..10)
            .map(|i| fixtures::playlist_item(&format!("v{}", i), "x"))
            .collect();
        let platform = platform_with_items(items).await;
        platform.ignore_page_size(true).await;
        let store = Arc::new(CatalogStore::new());

        let videos = synchronizer(&platform, &store).sync(None, 3).await.unwrap();
        assert_eq!(videos.len(), 3);
    }

    #[tokio::test]
    async fn test_specific_channel() {
        let platform = Arc::new(MockVideoPlatform::new());
        platform
            .set_uploads(ChannelSelector::Id("UCother".to_string()), "UUother")
            .await;
        platform
            .set_playlist("UUother", vec![fixtures::playlist_item("o1", "Other")])
            .await;
        let store = Arc::new(CatalogStore::new());

        let videos = synchronizer(&platform, &store)
            .sync(Some("UCother"), 200)
            .await
            .unwrap();
        assert_eq!(videos[0].id, "o1");
    }

    #[tokio::test]
    async fn test_unknown_channel_leaves_store() {
        let platform = Arc::new(MockVideoPlatform::new());
        let store = Arc::new(CatalogStore::new());
        store.replace(vec![fixtures::video_record("keep", "Keep me")]).await;

        let result = synchronizer(&platform, &store).sync(Some("UCnope"), 200).await;
        assert!(matches!(result, Err(SyncError::ChannelNotFound(_))));
        assert_eq!(store.videos().await[0].id, "keep");
    }

    #[tokio::test]
    async fn test_platform_error_leaves_store() {
        let platform = platform_with_items(vec![fixtures::playlist_item("v1", "A")]).await;
        platform
            .fail_next(PlatformError::ApiError {
                status: 500,
                message: "backend error".to_string(),
            })
            .await;
        let store = Arc::new(CatalogStore::new());
        store.replace(vec![fixtures::video_record("keep", "Keep me")]).await;

        let result = synchronizer(&platform, &store).sync(None, 200).await;
        assert!(matches!(result, Err(SyncError::Platform(_))));
        assert_eq!(store.len().await, 1);
        assert_eq!(store.videos().await[0].id, "keep");
    }

    #[tokio::test]
    async fn test_resync_replaces_rather_than_merges() {
        let platform = platform_with_items(vec![
            fixtures::playlist_item("v1", "A"),
            fixtures::playlist_item("v2", "B"),
        ])
        .await;
        let store = Arc::new(CatalogStore::new());
        let sync = synchronizer(&platform, &store);

        let first = sync.sync(None, 200).await.unwrap();
        let second = sync.sync(None, 200).await.unwrap();
        assert_eq!(first, second);

        platform
            .set_playlist("UUmine", vec![fixtures::playlist_item("v9", "Z")])
            .await;
        sync.sync(None, 200).await.unwrap();

        let videos = store.videos().await;
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].id, "v9");
    }
}
