//! Distributed lock and idempotency-cache collaborator.
//!
//! The booking write path serializes on an ephemeral mutual-exclusion token
//! and deduplicates retries through a TTL'd response cache. Both live behind
//! one trait so a shared store (e.g. Redis in production) can back them; the
//! in-memory implementation covers tests and single-node deployments.

pub mod memory;

use async_trait::async_trait;
use std::time::Duration;

pub use memory::InMemoryLockStore;

/// Result type for lock store operations
pub type LockStoreResult<T> = Result<T, LockStoreError>;

/// Error type for lock store operations
#[derive(Debug, thiserror::Error)]
pub enum LockStoreError {
    #[error("Lock store backend error: {0}")]
    Backend(String),
}

/// Shared lock/cache store.
///
/// Locks are non-blocking: `acquire_lock` reports `false` immediately when
/// the key is held rather than waiting. Every entry carries a TTL; expiry is
/// the only cleanup mechanism for attempts that crash before releasing.
#[async_trait]
pub trait LockStore: Send + Sync {
    /// Try to take the lock. `false` means another holder has it.
    async fn acquire_lock(&self, key: &str, ttl: Duration) -> LockStoreResult<bool>;

    /// Release a held lock. Releasing an expired or unknown key is a no-op.
    async fn release_lock(&self, key: &str) -> LockStoreResult<()>;

    /// Read a cached value, if present and unexpired.
    async fn get_cache(&self, key: &str) -> LockStoreResult<Option<String>>;

    /// Store a value with a TTL, overwriting any previous entry.
    async fn set_cache(&self, key: &str, value: &str, ttl: Duration) -> LockStoreResult<()>;
}
