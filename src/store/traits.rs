use std::time::Duration;

use async_trait::async_trait;

use crate::errors::Result;

/// Short code → target URL mapping where every entry expires after a fixed TTL.
///
/// - `get` never returns an entry past its expiry, whether or not it has been
///   physically reclaimed yet
/// - The TTL is chosen when the store is built and applies to every insert
/// - Implementations synchronise internally; callers share them as
///   `Arc<dyn ExpiringStore>` without extra locking
#[async_trait]
pub trait ExpiringStore: Send + Sync {
    /// Look up a live entry. `None` covers never-set, removed and expired keys.
    async fn get(&self, key: &str) -> Option<String>;

    /// Insert or overwrite. Only fails when the store is full.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Insert only if no live entry holds `key`.
    ///
    /// Returns `Ok(false)` without touching the existing entry on collision.
    /// An expired entry under the same key is replaced.
    async fn insert_if_absent(&self, key: &str, value: String) -> Result<bool>;

    async fn remove(&self, key: &str);

    /// Approximate entry count, may still include expired entries
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ttl(&self) -> Duration;

    fn backend_name(&self) -> &'static str;
}
