use std::path::Path;
use std::sync::Arc;

use tubedesk_core::{
    CatalogStore, Config, MetadataUpdater, SanitizedConfig, ThumbnailCache, ThumbnailSource,
    VideoPlatform, VideoSynchronizer,
};

/// Shared application state
pub struct AppState {
    config: Config,
    catalog: Arc<CatalogStore>,
    synchronizer: VideoSynchronizer,
    updater: MetadataUpdater,
    thumbnails: ThumbnailCache,
}

impl AppState {
    pub fn new(
        config: Config,
        platform: Arc<dyn VideoPlatform>,
        thumbnail_source: Arc<dyn ThumbnailSource>,
    ) -> Self {
        let catalog = Arc::new(CatalogStore::new());

        let synchronizer = VideoSynchronizer::new(
            Arc::clone(&platform),
            Arc::clone(&catalog),
            config.youtube.page_size,
        );
        let updater = MetadataUpdater::new(platform, config.youtube.category_id.clone());
        let thumbnails = ThumbnailCache::new(
            config.cache.thumbnail_dir.clone(),
            Arc::clone(&catalog),
            thumbnail_source,
        );

        Self {
            config,
            catalog,
            synchronizer,
            updater,
            thumbnails,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn synchronizer(&self) -> &VideoSynchronizer {
        &self.synchronizer
    }

    pub fn updater(&self) -> &MetadataUpdater {
        &self.updater
    }

    pub fn thumbnails(&self) -> &ThumbnailCache {
        &self.thumbnails
    }

    pub fn backup_path(&self) -> &Path {
        &self.config.storage.backup_path
    }

    /// Videos collected by a synchronization when the request names no limit.
    pub fn default_max_results(&self) -> u32 {
        self.config.youtube.max_results
    }
}
