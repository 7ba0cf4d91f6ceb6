use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::StaticConfig;
use crate::services::LinkService;
use crate::store::{ExpiringStore, StoreFactory};

/// Everything the HTTP workers share
pub struct StartupContext {
    pub store: Arc<dyn ExpiringStore>,
    pub link_service: Arc<LinkService>,
}

/// 准备服务器启动的上下文（存储 + 服务）
pub fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let store = StoreFactory::create(&config.store).context("Failed to create store backend")?;
    let link_service = Arc::new(LinkService::new(store.clone()));

    debug!("Pre-startup processing completed in {:?}", start_time.elapsed());

    Ok(StartupContext {
        store,
        link_service,
    })
}
