use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use ::moka::future::Cache;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::reservation::Reservation;
use crate::errors::{Result, TinylinkError};
use crate::store::ExpiringStore;

/// moka-backed store.
///
/// moka checks `time_to_live` on every read, so an expired link is never
/// handed out; physical removal happens during its housekeeping.
/// No `max_capacity` on the builder (moka would evict live links early),
/// capacity is checked on insert instead.
pub struct MokaStore {
    inner: Cache<String, String>,
    ttl: Duration,
    max_capacity: u64,
    /// Finished writes that `entry_count` may not reflect yet
    unsynced_writes: AtomicU64,
    /// Writes between the capacity check and the end of the insert
    in_flight: AtomicU64,
    sync_lock: Mutex<()>,
}

impl MokaStore {
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        let inner = Cache::builder().time_to_live(ttl).build();

        debug!(
            "MokaStore initialized with max capacity: {}, TTL: {}s",
            max_capacity,
            ttl.as_secs()
        );
        Self {
            inner,
            ttl,
            max_capacity,
            unsynced_writes: AtomicU64::new(0),
            in_flight: AtomicU64::new(0),
            sync_lock: Mutex::new(()),
        }
    }

    /// Never below the number of entries once every in-flight write lands.
    ///
    /// The counters are read before `entry_count`: a sync finishing in
    /// between can only make the sum too large, never too small.
    fn upper_bound(&self) -> u64 {
        let pending = self.unsynced_writes.load(Ordering::SeqCst)
            + self.in_flight.load(Ordering::SeqCst);
        self.inner.entry_count() + pending
    }

    /// Flush moka's pending maintenance so `entry_count` is exact
    async fn sync(&self) {
        let _guard = self.sync_lock.lock().await;
        let synced = self.unsynced_writes.load(Ordering::SeqCst);
        self.inner.run_pending_tasks().await;
        self.unsynced_writes.fetch_sub(synced, Ordering::SeqCst);
    }

    /// Claim a slot for `key`. The returned reservation must be held until
    /// the write has been counted in `unsynced_writes`.
    async fn reserve(&self, key: &str) -> Result<Reservation<'_>> {
        let reservation = Reservation::acquire(&self.in_flight);
        if self.upper_bound() <= self.max_capacity {
            return Ok(reservation);
        }

        self.sync().await;
        if self.upper_bound() <= self.max_capacity || self.inner.contains_key(key) {
            return Ok(reservation);
        }

        warn!(
            "MokaStore full ({} entries), rejecting insert",
            self.max_capacity
        );
        Err(TinylinkError::store_capacity(format!(
            "store holds {} live entries",
            self.max_capacity
        )))
    }
}

#[async_trait]
impl ExpiringStore for MokaStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let _slot = self.reserve(key).await?;
        self.inner.insert(key.to_string(), value).await;
        self.unsynced_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn insert_if_absent(&self, key: &str, value: String) -> Result<bool> {
        let _slot = self.reserve(key).await?;
        let entry = self.inner.entry(key.to_string()).or_insert(value).await;
        if entry.is_fresh() {
            self.unsynced_writes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(entry.is_fresh())
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    fn len(&self) -> u64 {
        self.inner.entry_count()
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }

    fn backend_name(&self) -> &'static str {
        "moka"
    }
}
