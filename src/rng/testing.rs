use std::sync::{Arc, Mutex, MutexGuard};
use rand::RngCore;

pub struct SyncRng<R: RngCore + Send> {
    rng: Arc<Mutex<R>>,
}

impl<R: RngCore + Send> SyncRng<R> {
    pub fn new(rng: R) -> Self {
        SyncRng {
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    pub fn get_rng(&self) -> MutexGuard<'_, R> {
        self.rng.lock().unwrap()
    }
}

impl<R: RngCore + Send> Clone for SyncRng<R> {
    fn clone(&self) -> Self {
        SyncRng {
            rng: self.rng.clone(),
        }
    }
}
