//! 时段锁
//!
//! 每个 [`SlotKey`] 一把互斥锁，按需创建，释放后若无人等待则回收。

use dashmap::DashMap;
use parking_lot::Mutex;
use shared::models::SlotKey;
use std::sync::Arc;
use std::time::Duration;

use super::{StoreError, StoreResult};

/// Per-slot exclusive locks with bounded acquisition
#[derive(Debug)]
pub struct SlotLocks {
    locks: DashMap<SlotKey, Arc<Mutex<()>>>,
    timeout: Duration,
}

impl SlotLocks {
    pub fn new(timeout: Duration) -> Self {
        Self {
            locks: DashMap::new(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `f` while holding the lock for `slot`
    ///
    /// Fails with [`StoreError::Unavailable`] when the lock cannot be taken
    /// within the configured timeout.
    pub fn with_slot<T>(
        &self,
        slot: &SlotKey,
        f: impl FnOnce() -> StoreResult<T>,
    ) -> StoreResult<T> {
        let lock = Arc::clone(&self.locks.entry(slot.clone()).or_default());

        let result = match lock.try_lock_for(self.timeout) {
            Some(_guard) => f(),
            None => {
                tracing::warn!(
                    slot = %slot,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Slot lock timed out"
                );
                Err(StoreError::Unavailable(format!("timed out waiting for slot {slot}")))
            }
        };

        drop(lock);
        // 只剩 map 自己持有时回收 (entry() 与 remove_if 在同一分片锁下互斥)
        self.locks.remove_if(slot, |_, lock| Arc::strong_count(lock) == 1);

        result
    }

    /// No slot currently holds a lock entry
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
