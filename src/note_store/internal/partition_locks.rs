use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use crate::username_string::{UsernameStr, UsernameString};

/// One async mutex per username, held across a collection's
/// read-modify-write. Entries live only while someone holds or waits for
/// them.
#[derive(Default)]
pub(super) struct PartitionLocks {
    locks: scc::HashMap<UsernameString, Arc<Mutex<()>>>,
}

pub(super) struct PartitionGuard<'a> {
    guard: Option<OwnedMutexGuard<()>>,
    locks: &'a scc::HashMap<UsernameString, Arc<Mutex<()>>>,
    username: UsernameString,
}

impl PartitionLocks {
    pub async fn lock(&self, username: &UsernameStr) -> PartitionGuard<'_> {
        // cloned under the bucket lock, so eviction sees this caller
        let lock = self.locks
            .entry_async(username.to_owned())
            .await
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .get()
            .clone();
        PartitionGuard {
            guard: Some(lock.lock_owned().await),
            locks: &self.locks,
            username: username.to_owned(),
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.locks.len()
    }
}

impl Drop for PartitionGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.locks.remove_if(
            &self.username,
            |lock| Arc::strong_count(lock) == 1,
        );
    }
}
