//! Cached thumbnail serving.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::error;
use tubedesk_core::THUMBNAIL_MIME;

use crate::state::AppState;

/// GET /thumbnail/{filename}
///
/// Serve a cached thumbnail, downloading it on first access.
pub async fn serve_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Response {
    match state.thumbnails().resolve(&filename).await {
        Ok(Some(bytes)) => ([(header::CONTENT_TYPE, THUMBNAIL_MIME)], bytes).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            error!("Error serving thumbnail {}: {}", filename, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
