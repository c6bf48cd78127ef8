pub mod catalog;
pub mod config;
pub mod credentials;
pub mod platform;
pub mod synchronizer;
pub mod testing;
pub mod thumbnails;
pub mod updater;

pub use catalog::{backup, BackupError, CatalogStore, ThumbnailVariant, VideoRecord};
pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, CacheConfig,
    Config, ConfigError, CredentialsConfig, SanitizedConfig, ServerConfig, StorageConfig,
    YouTubeConfig,
};
pub use credentials::{
    create_token_source, AccessTokenSource, CredentialError, FileCredentialProvider,
    StaticTokenProvider,
};
pub use platform::{
    ChannelSelector, PlatformError, PlaylistItem, PlaylistPage, SnippetUpdate, VideoPlatform,
    YouTubeClient,
};
pub use synchronizer::{thumbnail_filename, SyncError, VideoSynchronizer, THUMBNAIL_ROUTE_PREFIX};
pub use thumbnails::{
    HttpThumbnailSource, ThumbnailCache, ThumbnailError, ThumbnailSource, THUMBNAIL_MIME,
};
pub use updater::{
    BatchReport, MetadataUpdater, UpdateError, VideoEdit, MISSING_FIELDS, REMOTE_UPDATE_FAILED,
};
