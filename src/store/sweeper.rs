//! Background expiry sweeper for the memory store
//!
//! Reads already treat expired entries as missing. The sweeper reclaims the
//! memory of entries that expire and are never read again.

use std::sync::Weak;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::watch;
use tracing::{debug, info, trace};

use super::memory::StoredLink;

/// Handle to the running sweeper task; dropping it stops the task.
#[derive(Debug)]
pub struct ExpirySweeper {
    shutdown_tx: watch::Sender<bool>,
}

impl ExpirySweeper {
    /// Spawn the sweeper on the current tokio runtime.
    ///
    /// Holds only a weak reference, the task also ends once the map is gone.
    pub fn start(map: Weak<DashMap<String, StoredLink>>, interval: Duration) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        tokio::spawn(sweeper_loop(map, interval, shutdown_rx));
        info!("Expiry sweeper started, interval: {:?}", interval);

        Self { shutdown_tx }
    }

    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

impl Drop for ExpirySweeper {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn sweeper_loop(
    map: Weak<DashMap<String, StoredLink>>,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    // 第一次 tick 立即返回，跳过
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            result = shutdown_rx.changed() => {
                if result.is_err() || *shutdown_rx.borrow() {
                    debug!("Expiry sweeper received shutdown signal");
                    return;
                }
            }
        }

        let Some(map) = map.upgrade() else {
            debug!("Store dropped, expiry sweeper exiting");
            return;
        };

        let removed = sweep_expired(&map, Instant::now());
        if removed > 0 {
            debug!(
                "Expiry sweep removed {} entries, {} remaining",
                removed,
                map.len()
            );
        } else {
            trace!("Expiry sweep found nothing to remove");
        }
    }
}

/// Remove every entry expired at `now`, returning how many were dropped.
///
/// `retain` write-locks one shard at a time, so readers on other shards are
/// never blocked.
pub(crate) fn sweep_expired(map: &DashMap<String, StoredLink>, now: Instant) -> usize {
    let mut removed = 0;
    map.retain(|_, link| {
        let keep = !link.is_expired_at(now);
        if !keep {
            removed += 1;
        }
        keep
    });
    removed
}
