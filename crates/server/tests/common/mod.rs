//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock video platform and a mock thumbnail source, so every route
//! can be exercised without network access or credentials.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use tubedesk_core::{
    testing::{MockThumbnailSource, MockVideoPlatform},
    CacheConfig, ChannelSelector, Config, StorageConfig, ThumbnailSource, VideoPlatform,
};
use tubedesk_server::state::AppState;

/// Re-export fixtures for test convenience
pub use tubedesk_core::testing::fixtures;

/// Uploads playlist of the authenticated user's channel in the mock.
pub const MY_UPLOADS: &str = "UUmine";

/// Test fixture for E2E testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_sync() {
///     let fixture = TestFixture::new().await;
///     fixture.set_my_uploads(vec![fixtures::playlist_item("v1", "First")]).await;
///
///     let response = fixture.get("/api/load_videos").await;
///     assert_eq!(response.body["count"], 1);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Shared state behind the router
    pub state: Arc<AppState>,
    /// Mock platform - configure uploads and update failures
    pub platform: Arc<MockVideoPlatform>,
    /// Mock image source - configure downloadable thumbnails
    pub thumbnail_source: Arc<MockThumbnailSource>,
    /// Temporary directory holding the thumbnail cache and the backup file
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub bytes: Bytes,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with empty mocks.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let platform = Arc::new(MockVideoPlatform::new());
        platform
            .set_uploads(ChannelSelector::Mine, MY_UPLOADS)
            .await;
        let thumbnail_source = Arc::new(MockThumbnailSource::new());

        let config = Config {
            cache: CacheConfig {
                thumbnail_dir: temp_dir.path().join("thumbnails"),
            },
            storage: StorageConfig {
                backup_path: temp_dir.path().join("videos_backup.json"),
            },
            ..Default::default()
        };

        let state = Arc::new(AppState::new(
            config,
            Arc::clone(&platform) as Arc<dyn VideoPlatform>,
            Arc::clone(&thumbnail_source) as Arc<dyn ThumbnailSource>,
        ));
        state
            .thumbnails()
            .ensure_dir()
            .await
            .expect("Failed to create thumbnail dir");

        let router = tubedesk_server::api::create_router(Arc::clone(&state));

        Self {
            router,
            state,
            platform,
            thumbnail_source,
            temp_dir,
        }
    }

    /// Replace the uploads of the authenticated user's channel.
    pub async fn set_my_uploads(&self, items: Vec<tubedesk_core::PlaylistItem>) {
        self.platform.set_playlist(MY_UPLOADS, items).await;
    }

    pub fn backup_path(&self) -> PathBuf {
        self.temp_dir.path().join("videos_backup.json")
    }

    pub fn thumbnail_path(&self, filename: &str) -> PathBuf {
        self.temp_dir.path().join("thumbnails").join(filename)
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request without a body.
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request("POST", path, None).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }
}
