//! Mock thumbnail source for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::thumbnails::{ThumbnailError, ThumbnailSource};

/// Serves configured bytes per URL and counts download attempts.
/// Unknown URLs fail with a 404 status.
#[derive(Debug, Default)]
pub struct MockThumbnailSource {
    images: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    fetched: Arc<RwLock<Vec<String>>>,
}

impl MockThumbnailSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `bytes` for `url`.
    pub async fn set_image(&self, url: &str, bytes: Vec<u8>) {
        self.images.write().await.insert(url.to_string(), bytes);
    }

    /// Number of download attempts so far.
    pub async fn fetch_count(&self) -> usize {
        self.fetched.read().await.len()
    }

    /// URLs requested, in order.
    pub async fn fetched_urls(&self) -> Vec<String> {
        self.fetched.read().await.clone()
    }
}

#[async_trait]
impl ThumbnailSource for MockThumbnailSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ThumbnailError> {
        self.fetched.write().await.push(url.to_string());
        self.images
            .read()
            .await
            .get(url)
            .cloned()
            .ok_or(ThumbnailError::Status(404))
    }
}
