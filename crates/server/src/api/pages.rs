//! Server-rendered catalog page.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::{context, Environment};
use tracing::error;
use tubedesk_core::VideoRecord;

use crate::state::AppState;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Render the catalog page. Names ending in `.html` get HTML auto-escaping.
pub fn render_index(videos: &[VideoRecord]) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("index.html", INDEX_TEMPLATE)?;
    env.get_template("index.html")?.render(context! {
        videos => videos,
        count => videos.len(),
    })
}

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    let videos = state.catalog().videos().await;

    match render_index(&videos) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            error!("Error rendering index page: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
