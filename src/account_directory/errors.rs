use thiserror::Error;
use crate::kv_store::KvStoreError;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("username is already taken")]
    DuplicateUsername,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("account storage unavailable: {0}")]
    StorageUnavailable(#[source] KvStoreError),
}
