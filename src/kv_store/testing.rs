use std::collections::HashSet;
use std::io;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::yield_now;
use crate::kv_store::{KeyValueStore, KvStoreError, MemoryKeyValueStore};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreEvent {
    Get {
        key: String,
    },
    Set {
        key: String,
        value: String,
    },
    Remove {
        key: String,
    },
}

/// In-memory store with per-key failure injection and an event log.
///
/// Every call yields once before touching the data, so concurrent callers
/// interleave the way they would over a real device store.
#[derive(Debug, Default)]
pub struct TestKeyValueStore {
    inner: MemoryKeyValueStore,
    failing_reads: Mutex<HashSet<String>>,
    failing_writes: Mutex<HashSet<String>>,
    events: Mutex<Vec<StoreEvent>>,
}

impl TestKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_values<'a>(
        values: impl IntoIterator<Item=(&'a str, &'a str)>,
    ) -> Self {
        let store = Self::new();
        for (key, value) in values {
            store.inner.set(key, value).await.unwrap();
        }
        store
    }

    pub async fn fail_reads(&self, key: &str) {
        self.failing_reads.lock().await.insert(key.to_owned());
    }

    pub async fn fail_writes(&self, key: &str) {
        self.failing_writes.lock().await.insert(key.to_owned());
    }

    pub async fn heal(&self, key: &str) {
        self.failing_reads.lock().await.remove(key);
        self.failing_writes.lock().await.remove(key);
    }

    pub async fn get_events(&self) -> Vec<StoreEvent> {
        self.events.lock().await.to_vec()
    }

    pub async fn get_writes(&self) -> Vec<StoreEvent> {
        self.events.lock().await
            .iter()
            .filter(|ev| !matches!(ev, StoreEvent::Get { .. }))
            .cloned()
            .collect()
    }

    pub async fn raw(&self, key: &str) -> Option<String> {
        self.inner.get(key).await.unwrap()
    }
}

fn injected_failure() -> KvStoreError {
    io::Error::from(io::ErrorKind::Other).into()
}

#[async_trait]
impl KeyValueStore for TestKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvStoreError> {
        self.events.lock().await
            .push(StoreEvent::Get { key: key.to_owned() });
        yield_now().await;
        if self.failing_reads.lock().await.contains(key) {
            return Err(injected_failure());
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KvStoreError> {
        self.events.lock().await
            .push(
                StoreEvent::Set {
                    key: key.to_owned(),
                    value: value.to_owned(),
                }
            );
        yield_now().await;
        if self.failing_writes.lock().await.contains(key) {
            return Err(injected_failure());
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), KvStoreError> {
        self.events.lock().await
            .push(StoreEvent::Remove { key: key.to_owned() });
        yield_now().await;
        if self.failing_writes.lock().await.contains(key) {
            return Err(injected_failure());
        }
        self.inner.remove(key).await
    }
}
