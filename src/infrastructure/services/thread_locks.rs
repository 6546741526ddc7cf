//! Per-thread turn serialization

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OwnedMutexGuard;

use crate::domain::ThreadId;

type ThreadLock = Arc<tokio::sync::Mutex<()>>;

/// One async mutex per active thread id
///
/// Entries exist only while some turn holds or waits for them.
#[derive(Debug, Default)]
pub struct ThreadLocks {
    locks: Mutex<HashMap<ThreadId, ThreadLock>>,
}

/// Held for the duration of one turn; releasing it prunes the entry when unused
#[derive(Debug)]
pub struct ThreadGuard<'a> {
    guard: Option<OwnedMutexGuard<()>>,
    locks: &'a ThreadLocks,
    thread_id: ThreadId,
}

impl ThreadLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other turn holds `thread_id`
    pub async fn acquire(&self, thread_id: &ThreadId) -> ThreadGuard<'_> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.entry(thread_id.clone()).or_default().clone()
        };

        ThreadGuard {
            guard: Some(lock.lock_owned().await),
            locks: self,
            thread_id: thread_id.clone(),
        }
    }

    /// Number of threads with a holder or waiter
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn release(&self, thread_id: &ThreadId) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if locks
            .get(thread_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(thread_id);
        }
    }
}

impl Drop for ThreadGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.locks.release(&self.thread_id);
    }
}
