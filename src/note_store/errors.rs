use thiserror::Error;
use crate::kv_store::KvStoreError;

#[derive(Debug, Error)]
pub enum NoteStoreError {
    #[error("note not found")]
    NotFound,

    #[error("failed to persist notes: {0}")]
    PersistFailed(#[source] KvStoreError),
}
