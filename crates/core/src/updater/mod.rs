//! Title/description edits, single and batched.

mod types;

pub use types::*;

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::catalog::CatalogStore;
use crate::platform::{PlatformError, SnippetUpdate, VideoPlatform};

/// Failure reason reported for an edit rejected before any remote call.
pub const MISSING_FIELDS: &str = "Missing required fields";

/// Failure reason reported when the platform rejected an edit.
pub const REMOTE_UPDATE_FAILED: &str = "YouTube API update failed";

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("{}", MISSING_FIELDS)]
    MissingFields,

    #[error("No updates provided")]
    EmptyBatch,

    #[error("Remote update failed: {0}")]
    Platform(#[from] PlatformError),
}

pub struct MetadataUpdater {
    platform: Arc<dyn VideoPlatform>,
    category_id: String,
}

impl MetadataUpdater {
    pub fn new(platform: Arc<dyn VideoPlatform>, category_id: impl Into<String>) -> Self {
        Self {
            platform,
            category_id: category_id.into(),
        }
    }

    /// Push a new title and description for one video.
    ///
    /// Does not touch the catalog; see [`MetadataUpdater::apply`].
    pub async fn update(
        &self,
        video_id: &str,
        title: &str,
        description: &str,
    ) -> Result<(), UpdateError> {
        let update = SnippetUpdate {
            title: title.to_string(),
            description: description.to_string(),
            category_id: self.category_id.clone(),
        };

        self.platform
            .update_video_snippet(video_id, &update)
            .await
            .map_err(|e| {
                error!("Error updating video {}: {}", video_id, e);
                UpdateError::from(e)
            })
    }

    /// Validate an edit, push it, and mirror it into the store on success.
    pub async fn apply(&self, store: &CatalogStore, edit: &VideoEdit) -> Result<(), UpdateError> {
        let (video_id, title, description) = edit.validated().ok_or(UpdateError::MissingFields)?;

        self.update(video_id, title, description).await?;

        if !store.apply_edit(video_id, title, description).await {
            warn!("Updated video {} is not in the local catalog", video_id);
        }
        Ok(())
    }

    /// Apply edits one after another. Earlier successes are kept when later
    /// edits fail.
    ///
    /// The only error is [`UpdateError::EmptyBatch`]; per-item failures are
    /// part of the report.
    pub async fn update_batch(
        &self,
        store: &CatalogStore,
        edits: &[VideoEdit],
    ) -> Result<BatchReport, UpdateError> {
        if edits.is_empty() {
            return Err(UpdateError::EmptyBatch);
        }

        let mut results = BatchResults::default();
        for edit in edits {
            match self.apply(store, edit).await {
                Ok(()) => results.successful.push(BatchSuccess {
                    video_id: edit.video_id.clone().unwrap_or_default(),
                    title: edit.title.clone().unwrap_or_default(),
                }),
                Err(UpdateError::MissingFields) => results.failed.push(BatchFailure {
                    video_id: edit.video_id.clone(),
                    error: MISSING_FIELDS.to_string(),
                }),
                Err(_) => results.failed.push(BatchFailure {
                    video_id: edit.video_id.clone(),
                    error: REMOTE_UPDATE_FAILED.to_string(),
                }),
            }
        }

        let report = BatchReport::new(edits.len(), results);
        info!(
            "Batch update finished: {} total, {} successful, {} failed",
            report.summary.total, report.summary.successful, report.summary.failed
        );
        Ok(report)
    }
}
