//! Types for the video catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A video from the channel's uploads, as shown and edited in the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    /// Platform video identifier (unique).
    pub id: String,
    pub title: String,
    pub description: String,
    /// Local serving path of the preferred thumbnail, or empty.
    pub thumbnail_url: String,
    /// Available thumbnails by size name, with local serving paths.
    #[serde(default)]
    pub thumbnails: BTreeMap<String, ThumbnailVariant>,
    /// ISO-8601 publication timestamp.
    pub published_at: String,
    pub privacy_status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailVariant {
    pub url: String,
    pub width: u32,
    pub height: u32,
}
