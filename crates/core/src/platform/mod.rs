//! Remote video platform access.
//!
//! The synchronizer and the metadata updater only see the [`VideoPlatform`]
//! trait; [`YouTubeClient`] is the HTTP implementation.

mod types;
mod youtube;

pub use types::*;
pub use youtube::YouTubeClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::credentials::CredentialError;

/// Errors that can occur when talking to the video platform.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// No usable access token.
    #[error("Credentials unavailable: {0}")]
    Credentials(#[from] CredentialError),

    /// Token rejected by the platform.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Daily quota used up.
    #[error("API quota exceeded")]
    QuotaExceeded,

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Operations the catalog needs from the hosting platform.
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// Resolve the uploads playlist of a channel.
    ///
    /// Returns `None` when the channel does not exist or exposes no content details.
    async fn uploads_playlist(
        &self,
        channel: &ChannelSelector,
    ) -> Result<Option<String>, PlatformError>;

    /// Fetch one page of a playlist.
    async fn playlist_page(
        &self,
        playlist_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> Result<PlaylistPage, PlatformError>;

    /// Replace the title, description and category of a video.
    async fn update_video_snippet(
        &self,
        video_id: &str,
        update: &SnippetUpdate,
    ) -> Result<(), PlatformError>;
}
