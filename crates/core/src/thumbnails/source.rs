use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::ThumbnailError;

/// Where missing thumbnails are downloaded from.
#[async_trait]
pub trait ThumbnailSource: Send + Sync {
    /// Download the image at `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ThumbnailError>;
}

/// Plain HTTP GET of the platform's image URL.
pub struct HttpThumbnailSource {
    client: Client,
}

impl HttpThumbnailSource {
    pub fn new(timeout_secs: u64) -> Result<Self, ThumbnailError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ThumbnailSource for HttpThumbnailSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ThumbnailError> {
        debug!("Downloading thumbnail {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ThumbnailError::Status(status.as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
