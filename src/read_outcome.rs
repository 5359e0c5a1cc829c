use log::error;
use crate::kv_store::KvStoreError;

/// Result of loading a stored value.
///
/// Keeps "nothing stored" apart from "could not read", so callers that only
/// want the degraded view and callers that must not write over unreadable
/// data can share one read path.
#[derive(Debug)]
pub enum ReadOutcome<T> {
    Absent,
    Found(T),
    Fault(KvStoreError),
}

impl<T> ReadOutcome<T> {
    pub fn is_fault(&self) -> bool {
        matches!(self, ReadOutcome::Fault(_))
    }

    pub fn into_result(self) -> Result<Option<T>, KvStoreError> {
        match self {
            ReadOutcome::Absent => Ok(None),
            ReadOutcome::Found(v) => Ok(Some(v)),
            ReadOutcome::Fault(e) => Err(e),
        }
    }

    /// Faults are logged and reported as absent.
    pub fn found_or_log(self, what: &str) -> Option<T> {
        match self {
            ReadOutcome::Absent => None,
            ReadOutcome::Found(v) => Some(v),
            ReadOutcome::Fault(e) => {
                error!("failed to read {what}: {e}");
                None
            },
        }
    }
}

impl<T: Default> ReadOutcome<T> {
    pub fn unwrap_or_degraded(self, what: &str) -> T {
        self.found_or_log(what).unwrap_or_default()
    }
}
