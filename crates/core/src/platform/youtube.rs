//! YouTube Data API v3 client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use super::types::{ChannelListResponse, ChannelSelector, PlaylistPage, SnippetUpdate};
use super::{PlatformError, VideoPlatform};
use crate::config::YouTubeConfig;
use crate::credentials::AccessTokenSource;

/// YouTube Data API client.
pub struct YouTubeClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn AccessTokenSource>,
}

impl YouTubeClient {
    /// Create a new client.
    pub fn new(
        config: &YouTubeConfig,
        tokens: Arc<dyn AccessTokenSource>,
    ) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    async fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, PlatformError> {
        let token = self.tokens.access_token().await?;
        Ok(request.bearer_auth(token))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, PlatformError> {
        let response = self.authorized(request).await?.send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::UNAUTHORIZED => PlatformError::Unauthorized(body),
            StatusCode::FORBIDDEN if body.contains("quotaExceeded") => {
                PlatformError::QuotaExceeded
            }
            StatusCode::NOT_FOUND => PlatformError::NotFound(body),
            _ => PlatformError::ApiError {
                status: status.as_u16(),
                message: body,
            },
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<T, PlatformError> {
        self.send(request).await?.json().await.map_err(|e| {
            PlatformError::ParseError(format!("Failed to parse {} response: {}", what, e))
        })
    }
}

#[async_trait]
impl VideoPlatform for YouTubeClient {
    async fn uploads_playlist(
        &self,
        channel: &ChannelSelector,
    ) -> Result<Option<String>, PlatformError> {
        let url = format!("{}/channels", self.base_url);

        debug!("Resolving uploads playlist for {:?}", channel);

        let mut request = self.client.get(&url).query(&[("part", "contentDetails")]);
        request = match channel {
            ChannelSelector::Mine => request.query(&[("mine", "true")]),
            ChannelSelector::Id(id) => request.query(&[("id", id.as_str())]),
        };

        let response: ChannelListResponse = self.get_json(request, "channel list").await?;
        Ok(response.uploads_playlist())
    }

    async fn playlist_page(
        &self,
        playlist_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> Result<PlaylistPage, PlatformError> {
        let url = format!("{}/playlistItems", self.base_url);

        debug!(
            "Playlist page: playlist={}, max_results={}, page_token={:?}",
            playlist_id, max_results, page_token
        );

        let max_results = max_results.to_string();
        let mut request = self.client.get(&url).query(&[
            ("part", "snippet,status"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
        ]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        self.get_json(request, "playlist items").await
    }

    async fn update_video_snippet(
        &self,
        video_id: &str,
        update: &SnippetUpdate,
    ) -> Result<(), PlatformError> {
        let url = format!("{}/videos", self.base_url);

        debug!("Updating snippet of video {}", video_id);

        let request = self
            .client
            .put(&url)
            .query(&[("part", "snippet")])
            .json(&json!({
                "id": video_id,
                "snippet": update,
            }));

        self.send(request).await?;
        Ok(())
    }
}
