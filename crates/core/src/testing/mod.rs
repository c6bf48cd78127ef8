//! Testing utilities and mock implementations.
//!
//! Mocks for the remote platform and the thumbnail download source, so the
//! synchronizer, updater, cache and HTTP layer can be exercised without
//! network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use tubedesk_core::testing::{fixtures, MockThumbnailSource, MockVideoPlatform};
//!
//! let platform = MockVideoPlatform::new();
//! platform.set_uploads(ChannelSelector::Mine, "UUmine").await;
//! platform.set_playlist("UUmine", vec![fixtures::playlist_item("v1", "First")]).await;
//! platform.fail_updates_for("v1").await;
//! ```

mod mock_platform;
mod mock_thumbnail_source;

pub use mock_platform::{MockVideoPlatform, RecordedPlatformCall};
pub use mock_thumbnail_source::MockThumbnailSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::collections::BTreeMap;

    use crate::catalog::VideoRecord;
    use crate::platform::{
        PlaylistItem, PlaylistItemSnippet, PlaylistItemStatus, RemoteThumbnail, ResourceId,
    };

    fn remote_thumbnail(video_id: &str, file: &str, width: u32, height: u32) -> RemoteThumbnail {
        RemoteThumbnail {
            url: format!("https://i.ytimg.com/vi/{}/{}", video_id, file),
            width: Some(width),
            height: Some(height),
        }
    }

    /// Create a public upload with `default`, `medium` and `high` thumbnails.
    pub fn playlist_item(video_id: &str, title: &str) -> PlaylistItem {
        let mut thumbnails = BTreeMap::new();
        thumbnails.insert(
            "default".to_string(),
            remote_thumbnail(video_id, "default.jpg", 120, 90),
        );
        thumbnails.insert(
            "medium".to_string(),
            remote_thumbnail(video_id, "mqdefault.jpg", 320, 180),
        );
        thumbnails.insert(
            "high".to_string(),
            remote_thumbnail(video_id, "hqdefault.jpg", 480, 360),
        );

        PlaylistItem {
            snippet: Some(PlaylistItemSnippet {
                title: title.to_string(),
                description: format!("Description of {}", title),
                published_at: "2024-01-15T12:00:00Z".to_string(),
                thumbnails,
                resource_id: Some(ResourceId {
                    kind: Some("youtube#video".to_string()),
                    video_id: Some(video_id.to_string()),
                }),
            }),
            status: Some(PlaylistItemStatus {
                privacy_status: Some("public".to_string()),
            }),
        }
    }

    /// Create an entry whose resource descriptor carries no video id.
    pub fn playlist_item_without_video_id(title: &str) -> PlaylistItem {
        let mut item = playlist_item("unused", title);
        if let Some(snippet) = item.snippet.as_mut() {
            snippet.resource_id = Some(ResourceId {
                kind: Some("youtube#video".to_string()),
                video_id: None,
            });
        }
        item
    }

    /// Create a catalog record without thumbnails.
    pub fn video_record(id: &str, title: &str) -> VideoRecord {
        VideoRecord {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("Description of {}", title),
            thumbnail_url: String::new(),
            thumbnails: BTreeMap::new(),
            published_at: "2024-01-15T12:00:00Z".to_string(),
            privacy_status: "public".to_string(),
        }
    }
}
