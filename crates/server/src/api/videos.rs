//! Catalog and metadata API handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};
use tubedesk_core::{backup, BackupError, UpdateError, VideoEdit, VideoRecord};

use crate::state::AppState;

/// Name offered to the browser for the catalog download.
const DOWNLOAD_FILENAME: &str = "videos_backup.json";

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct LoadVideosParams {
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub max_results: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct LoadVideosResponse {
    pub success: bool,
    pub videos: Vec<VideoRecord>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LoadFromFileResponse {
    pub success: bool,
    pub videos: Vec<VideoRecord>,
}

/// Items stay untyped so that one malformed item cannot reject the batch.
#[derive(Debug, Deserialize)]
pub struct BatchUpdateRequest {
    #[serde(default)]
    pub updates: Option<Vec<Value>>,
}

fn message(text: &str) -> Response {
    Json(MessageResponse {
        success: false,
        message: text.to_string(),
    })
    .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/load_videos
///
/// Re-synchronize the catalog from the channel's uploads.
pub async fn load_videos(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LoadVideosParams>,
) -> Json<LoadVideosResponse> {
    let max_results = params
        .max_results
        .filter(|n| *n > 0)
        .unwrap_or_else(|| state.default_max_results());

    match state
        .synchronizer()
        .sync(params.channel_id.as_deref(), max_results)
        .await
    {
        Ok(videos) => Json(LoadVideosResponse {
            success: true,
            count: videos.len(),
            videos,
        }),
        Err(e) => {
            error!("Error fetching videos: {}", e);
            Json(LoadVideosResponse {
                success: false,
                videos: Vec::new(),
                count: 0,
            })
        }
    }
}

/// POST /api/save_videos
///
/// Write the catalog to the backup file.
pub async fn save_videos(State(state): State<Arc<AppState>>) -> Json<SuccessResponse> {
    let success = match backup::save(state.catalog(), state.backup_path()).await {
        Ok(_) => true,
        Err(e) => {
            error!("Error saving videos: {}", e);
            false
        }
    };
    Json(SuccessResponse { success })
}

/// GET /api/download_videos
///
/// The catalog as a JSON file attachment.
pub async fn download_videos(State(state): State<Arc<AppState>>) -> Response {
    let videos = state.catalog().videos().await;

    match backup::to_json(&videos) {
        Ok(json) => (
            [
                (header::CONTENT_TYPE, "application/json".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename={}", DOWNLOAD_FILENAME),
                ),
            ],
            json,
        )
            .into_response(),
        Err(e) => {
            error!("Error creating download: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// POST /api/load_from_file
///
/// Replace the catalog with the backup file's contents.
pub async fn load_from_file(State(state): State<Arc<AppState>>) -> Response {
    match backup::load(state.catalog(), state.backup_path()).await {
        Ok(videos) => Json(LoadFromFileResponse {
            success: true,
            videos,
        })
        .into_response(),
        Err(BackupError::NotFound(_)) => message("No backup file found"),
        Err(BackupError::Parse(e)) => {
            warn!("Backup file is not a valid video list: {}", e);
            message("Backup file is invalid")
        }
        Err(e) => {
            error!("Error loading videos: {}", e);
            message("Failed to read backup file")
        }
    }
}

/// POST /api/update_video
///
/// Update one video's title and description.
pub async fn update_video(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Json<SuccessResponse> {
    let edit = VideoEdit::from_value(&body);
    let success = match state.updater().apply(state.catalog(), &edit).await {
        Ok(()) => true,
        Err(UpdateError::MissingFields) => {
            warn!("Rejected update with missing fields: {:?}", edit.video_id);
            false
        }
        // already logged by the updater
        Err(_) => false,
    };
    Json(SuccessResponse { success })
}

/// POST /api/update_videos_batch
///
/// Apply several edits; each is reported as successful or failed.
pub async fn update_videos_batch(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BatchUpdateRequest>,
) -> Response {
    let edits: Vec<VideoEdit> = request
        .updates
        .unwrap_or_default()
        .iter()
        .map(VideoEdit::from_value)
        .collect();

    match state.updater().update_batch(state.catalog(), &edits).await {
        Ok(report) => Json(report).into_response(),
        // an empty batch is the only batch-level failure
        Err(e) => {
            debug!("Batch rejected: {}", e);
            message("No updates provided")
        }
    }
}
