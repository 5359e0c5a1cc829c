mod errors;
mod file;
mod memory;
#[cfg(test)] pub mod testing;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use crate::read_outcome::ReadOutcome;

pub use errors::*;
pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;

/// Durable string-to-string map. Every `set` overwrites the whole value.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, KvStoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), KvStoreError>;

    /// Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<(), KvStoreError>;
}

#[async_trait]
pub trait KeyValueStoreExt: KeyValueStore {
    async fn get_json<T: DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> ReadOutcome<T> {
        match self.get(key).await {
            Ok(None) => ReadOutcome::Absent,
            Ok(Some(value)) => match serde_json::from_str(&value) {
                Ok(parsed) => ReadOutcome::Found(parsed),
                Err(e) => ReadOutcome::Fault(e.into()),
            },
            Err(e) => ReadOutcome::Fault(e),
        }
    }

    async fn set_json<T: Serialize + Sync + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), KvStoreError> {
        let encoded = serde_json::to_string(value)?;
        self.set(key, &encoded).await
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}
