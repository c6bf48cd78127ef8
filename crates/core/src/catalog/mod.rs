//! Video catalog: the current upload list, its thumbnail relation and the
//! JSON backup file.

pub mod backup;
mod store;
mod types;

pub use store::CatalogStore;
pub use types::*;

use thiserror::Error;

/// Errors for backup operations.
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("Backup file not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid backup contents: {0}")]
    Parse(String),
}
