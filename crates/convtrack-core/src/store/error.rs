//! Error type for key/value store access.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing file could not be read or written.
    #[error("store io: {0}")]
    Io(#[from] std::io::Error),
    /// Backing file exists but is not a JSON string map.
    #[error("store format: {0}")]
    Format(#[from] serde_json::Error),
    /// Browser storage refused the operation (quota, privacy mode, missing window).
    #[error("browser storage: {0}")]
    Browser(String),
}
