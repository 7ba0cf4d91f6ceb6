//! Expiring key-value store
//!
//! Backends:
//! - `moka`: `moka::future::Cache` with `time_to_live` (default)
//! - `memory`: `DashMap` with lazy expiry and a background sweeper

pub mod memory;
pub mod moka;
mod reservation;
pub mod sweeper;
pub mod traits;

use std::sync::Arc;

use tracing::info;

pub use self::memory::{MemoryStore, StoredLink};
pub use self::moka::MokaStore;
pub use self::sweeper::ExpirySweeper;
pub use self::traits::ExpiringStore;

use crate::config::StoreConfig;
use crate::errors::{Result, TinylinkError};

pub struct StoreFactory;

impl StoreFactory {
    /// Build the backend named by `store.type`
    pub fn create(config: &StoreConfig) -> Result<Arc<dyn ExpiringStore>> {
        let store: Arc<dyn ExpiringStore> = match config.store_type.as_str() {
            "moka" => Arc::new(MokaStore::new(config.ttl(), config.max_capacity)),
            "memory" => Arc::new(MemoryStore::new(
                config.ttl(),
                config.max_capacity,
                config.sweep_interval(),
            )),
            other => {
                return Err(TinylinkError::config(format!(
                    "Unknown store type '{}'. Valid: moka, memory",
                    other
                )));
            }
        };

        info!(
            "Using store backend: {} (TTL: {}s)",
            store.backend_name(),
            store.ttl().as_secs()
        );
        Ok(store)
    }
}
