use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, warn};

use super::reservation::Reservation;
use super::sweeper::{ExpirySweeper, sweep_expired};
use crate::errors::{Result, TinylinkError};
use crate::store::ExpiringStore;

/// A stored target URL plus the instant it stops being readable
#[derive(Debug, Clone)]
pub struct StoredLink {
    pub target: String,
    pub expires_at: Instant,
}

impl StoredLink {
    fn new(target: String, ttl: Duration) -> Self {
        Self {
            target,
            expires_at: Instant::now() + ttl,
        }
    }

    #[inline]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// DashMap-backed store with lazy expiry on read and an optional sweeper.
pub struct MemoryStore {
    inner: Arc<DashMap<String, StoredLink>>,
    ttl: Duration,
    max_capacity: u64,
    /// Writes between the capacity check and the end of the insert
    in_flight: AtomicU64,
    _sweeper: Option<ExpirySweeper>,
}

impl MemoryStore {
    /// Build the store; with `sweep_interval` set a sweeper task is spawned on
    /// the current tokio runtime (skipped with a warning outside one).
    pub fn new(ttl: Duration, max_capacity: u64, sweep_interval: Option<Duration>) -> Self {
        let inner = Arc::new(DashMap::new());

        let sweeper = match sweep_interval {
            Some(interval) if tokio::runtime::Handle::try_current().is_ok() => {
                Some(ExpirySweeper::start(Arc::downgrade(&inner), interval))
            }
            Some(_) => {
                warn!("No tokio runtime available, expiry sweeper disabled");
                None
            }
            None => None,
        };

        debug!(
            "MemoryStore initialized with max capacity: {}, TTL: {}s",
            max_capacity,
            ttl.as_secs()
        );
        Self {
            inner,
            ttl,
            max_capacity,
            in_flight: AtomicU64::new(0),
            _sweeper: sweeper,
        }
    }

    /// Drop every expired entry now, returns the number removed
    pub fn purge_expired(&self) -> usize {
        sweep_expired(&self.inner, Instant::now())
    }

    /// Entries plus writes still in flight. `in_flight` is read first, so a
    /// write that finishes in between is counted twice rather than missed.
    fn upper_bound(&self) -> u64 {
        let pending = self.in_flight.load(Ordering::SeqCst);
        pending + self.inner.len() as u64
    }

    /// Claim a slot for `key`, held until the insert is done.
    ///
    /// Must be called without holding any shard guard: `len` read-locks
    /// every shard.
    fn reserve(&self, key: &str) -> Result<Reservation<'_>> {
        let reservation = Reservation::acquire(&self.in_flight);
        if self.upper_bound() <= self.max_capacity || self.inner.contains_key(key) {
            return Ok(reservation);
        }

        // 满了先清理过期项再判断
        self.purge_expired();
        if self.upper_bound() <= self.max_capacity {
            return Ok(reservation);
        }

        warn!(
            "MemoryStore full ({} entries), rejecting insert",
            self.max_capacity
        );
        Err(TinylinkError::store_capacity(format!(
            "store holds {} live entries",
            self.max_capacity
        )))
    }
}

#[async_trait]
impl ExpiringStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        {
            let link = self.inner.get(key)?;
            if !link.is_expired_at(now) {
                return Some(link.target.clone());
            }
        }

        // The read guard is released above; re-check under the write lock
        // so a concurrent fresh insert is not thrown away.
        self.inner.remove_if(key, |_, link| link.is_expired_at(now));
        None
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let _slot = self.reserve(key)?;
        self.inner
            .insert(key.to_string(), StoredLink::new(value, self.ttl));
        Ok(())
    }

    async fn insert_if_absent(&self, key: &str, value: String) -> Result<bool> {
        let _slot = self.reserve(key)?;

        match self.inner.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_expired_at(Instant::now()) {
                    occupied.insert(StoredLink::new(value, self.ttl));
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(StoredLink::new(value, self.ttl));
                Ok(true)
            }
        }
    }

    async fn remove(&self, key: &str) {
        self.inner.remove(key);
    }

    fn len(&self) -> u64 {
        self.inner.len() as u64
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
