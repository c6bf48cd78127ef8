use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{handlers, pages, thumbnails, videos};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // JSON API used by the page
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Catalog
        .route("/load_videos", get(videos::load_videos))
        .route("/save_videos", post(videos::save_videos))
        .route("/download_videos", get(videos::download_videos))
        .route("/load_from_file", post(videos::load_from_file))
        // Metadata edits
        .route("/update_video", post(videos::update_video))
        .route("/update_videos_batch", post(videos::update_videos_batch));

    Router::new()
        .route("/", get(pages::index))
        .route("/thumbnail/{filename}", get(thumbnails::serve_thumbnail))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
