use std::string::FromUtf8Error;
use thiserror::Error;
use tokio::io::Error as IoError;

#[derive(Debug, Error)]
pub enum KvStoreError {
    #[error("storage directory is not initialized properly")]
    DataDirNotInitialized,

    #[error(transparent)]
    Io(#[from] IoError),

    #[error("stored value too large")]
    TooBig,

    #[error("stored value is not valid UTF-8")]
    NotUtf8(#[from] FromUtf8Error),

    #[error("malformed stored value: {0}")]
    Json(#[from] serde_json::Error),
}

impl KvStoreError {
    /// The value exists but cannot be interpreted, as opposed to the store
    /// itself failing.
    pub fn is_malformed(&self) -> bool {
        matches!(self, KvStoreError::NotUtf8(_) | KvStoreError::Json(_))
    }
}
