//! On-demand thumbnail cache.
//!
//! Files are keyed by the filename derived during synchronization. The first
//! request for a filename downloads it from the registered remote URL; later
//! requests are served from disk.

mod source;

pub use source::{HttpThumbnailSource, ThumbnailSource};

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::catalog::CatalogStore;

/// Content type of every cached thumbnail.
pub const THUMBNAIL_MIME: &str = "image/jpeg";

#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {0}")]
    Status(u16),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Suffix of the temporary file a download is written to before it is
/// renamed into place.
const PARTIAL_SUFFIX: &str = ".part";

pub struct ThumbnailCache {
    dir: PathBuf,
    store: Arc<CatalogStore>,
    source: Arc<dyn ThumbnailSource>,
    /// One lock per filename being downloaded.
    downloads: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ThumbnailCache {
    pub fn new(dir: PathBuf, store: Arc<CatalogStore>, source: Arc<dyn ThumbnailSource>) -> Self {
        Self {
            dir,
            store,
            source,
            downloads: Mutex::new(HashMap::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the cache directory if needed.
    pub async fn ensure_dir(&self) -> Result<(), ThumbnailError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Image bytes for `filename`, or `None` when it is neither cached nor
    /// known. Download failures are logged and reported as `None`.
    ///
    /// Concurrent requests for the same missing file share one download.
    /// Errors are local I/O failures only.
    pub async fn resolve(&self, filename: &str) -> Result<Option<Vec<u8>>, ThumbnailError> {
        if !is_safe_filename(filename) {
            debug!("Rejected thumbnail filename {:?}", filename);
            return Ok(None);
        }

        let path = self.dir.join(filename);
        if let Some(bytes) = read_cached(&path).await? {
            return Ok(Some(bytes));
        }

        let lock = {
            let mut downloads = self.downloads.lock().await;
            Arc::clone(downloads.entry(filename.to_string()).or_default())
        };
        let result = {
            let _guard = lock.lock().await;
            self.download(filename, &path).await
        };

        drop(lock);
        let mut downloads = self.downloads.lock().await;
        // Only the map still holds the lock: nobody is waiting on it.
        if downloads
            .get(filename)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            downloads.remove(filename);
        }

        result
    }

    /// Miss path; runs with the filename's lock held.
    async fn download(
        &self,
        filename: &str,
        path: &Path,
    ) -> Result<Option<Vec<u8>>, ThumbnailError> {
        // Another request may have finished the download while we waited.
        if let Some(bytes) = read_cached(path).await? {
            return Ok(Some(bytes));
        }

        let Some(url) = self.store.thumbnail_source(filename).await else {
            return Ok(None);
        };

        let bytes = match self.source.fetch(&url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Error downloading thumbnail {}: {}", url, e);
                return Ok(None);
            }
        };

        let partial = self.dir.join(format!("{}{}", filename, PARTIAL_SUFFIX));
        if let Err(e) = write_then_rename(&partial, path, &bytes).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(e.into());
        }
        debug!("Cached thumbnail {} ({} bytes)", filename, bytes.len());

        Ok(Some(bytes))
    }
}

async fn read_cached(path: &Path) -> Result<Option<Vec<u8>>, ThumbnailError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Files only appear at `path` complete.
async fn write_then_rename(partial: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    tokio::fs::write(partial, bytes).await?;
    tokio::fs::rename(partial, path).await
}

/// Single path component only; no separators, no parent references and no
/// in-progress download files.
pub fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty()
        && filename != "."
        && !filename.ends_with(PARTIAL_SUFFIX)
        && !filename.contains("..")
        && !filename.contains('/')
        && !filename.contains('\\')
        && !filename.contains('\0')
}
