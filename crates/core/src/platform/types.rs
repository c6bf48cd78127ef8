//! Wire types for the video platform's Data API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which channel's uploads to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelSelector {
    /// The channel owned by the authenticated user.
    Mine,
    /// A channel by identifier.
    Id(String),
}

impl ChannelSelector {
    pub fn from_option(channel_id: Option<&str>) -> Self {
        match channel_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => Self::Id(id.to_string()),
            None => Self::Mine,
        }
    }
}

/// One page of an uploads playlist.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistPage {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<PlaylistItemSnippet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PlaylistItemStatus>,
}

impl PlaylistItem {
    /// Identifier of the video this entry points at, if any.
    pub fn video_id(&self) -> Option<&str> {
        self.snippet
            .as_ref()?
            .resource_id
            .as_ref()?
            .video_id
            .as_deref()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub thumbnails: BTreeMap<String, RemoteThumbnail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<ResourceId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteThumbnail {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemStatus {
    #[serde(default)]
    pub privacy_status: Option<String>,
}

/// Fields written by a snippet update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetUpdate {
    pub title: String,
    pub description: String,
    pub category_id: String,
}

// channels.list response, reduced to the uploads playlist.

#[derive(Debug, Deserialize)]
pub(crate) struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChannelResource {
    #[serde(default)]
    pub content_details: Option<ChannelContentDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChannelContentDetails {
    #[serde(default)]
    pub related_playlists: Option<RelatedPlaylists>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RelatedPlaylists {
    #[serde(default)]
    pub uploads: Option<String>,
}

impl ChannelListResponse {
    pub fn uploads_playlist(self) -> Option<String> {
        self.items
            .into_iter()
            .next()?
            .content_details?
            .related_playlists?
            .uploads
    }
}
