//! In-memory lock/cache store.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::{LockStore, LockStoreResult};

/// Single-process lock/cache store backed by a deadline map.
///
/// Expired entries are dropped lazily on access, mirroring how a TTL'd
/// external store behaves from the caller's point of view.
#[derive(Default)]
pub struct InMemoryLockStore {
    entries: Mutex<HashMap<String, Entry>>,
}

struct Entry {
    value: String,
    expires_at: Instant,
}

impl InMemoryLockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries. Test inspection helper.
    pub fn live_entries(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }
}

#[async_trait]
impl LockStore for InMemoryLockStore {
    async fn acquire_lock(&self, key: &str, ttl: Duration) -> LockStoreResult<bool> {
        let mut entries = self.entries.lock();
        let now = Instant::now();

        if let Some(existing) = entries.get(key) {
            if existing.expires_at > now {
                return Ok(false);
            }
        }

        entries.insert(
            key.to_string(),
            Entry {
                value: "locked".to_string(),
                expires_at: now + ttl,
            },
        );
        Ok(true)
    }

    async fn release_lock(&self, key: &str) -> LockStoreResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }

    async fn get_cache(&self, key: &str) -> LockStoreResult<Option<String>> {
        let mut entries = self.entries.lock();
        let now = Instant::now();

        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_cache(&self, key: &str, value: &str, ttl: Duration) -> LockStoreResult<()> {
        self.entries.lock().insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}
