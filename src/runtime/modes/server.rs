//! Server mode
//!
//! Wires the store into the HTTP routes, binds the listener and runs until
//! a shutdown signal, then drains in-flight requests.

use std::time::Duration;

use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::api::middleware::{AccessLogMiddleware, RequestIdMiddleware};
use crate::api::services::configure_routes;
use crate::config::StaticConfig;
use crate::runtime::lifetime;

/// Extra time past the configured drain window before giving up on the workers
const SHUTDOWN_GRACE_SECS: u64 = 5;

/// Run the HTTP server
///
/// **Note**: logging must be initialized before calling this function
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup(config)?;
    let link_service = startup.link_service.clone();

    let server_config = config.server.clone();
    let max_body_bytes = server_config.max_body_bytes;
    let bind_address = server_config.bind_address();
    let workers = server_config.workers.min(64);
    info!("Using {} workers for the server", workers);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(AccessLogMiddleware)
            .wrap(RequestIdMiddleware)
            .app_data(web::Data::new(link_service.clone()))
            .app_data(web::PayloadConfig::new(max_body_bytes))
            .configure(configure_routes)
    })
    .workers(workers)
    .client_request_timeout(server_config.read_timeout())
    .client_disconnect_timeout(server_config.write_timeout())
    .shutdown_timeout(server_config.shutdown_timeout_secs)
    // 信号由 listen_for_shutdown 统一处理
    .disable_signals()
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    info!("Starting server at http://{}", bind_address);

    let handle = server.handle();
    tokio::pin!(server);

    let signalled = tokio::select! {
        res = &mut server => {
            res.context("HTTP server exited with an error")?;
            false
        }
        _ = lifetime::shutdown::listen_for_shutdown() => true,
    };

    if signalled {
        let deadline =
            Duration::from_secs(server_config.shutdown_timeout_secs + SHUTDOWN_GRACE_SECS);
        let drain = async {
            handle.stop(true).await;
            server.await
        };

        match tokio::time::timeout(deadline, drain).await {
            Ok(Ok(())) => info!("Graceful shutdown completed"),
            Ok(Err(e)) => warn!("Server reported an error while stopping: {}", e),
            Err(_) => error!(
                "Shutdown did not finish within {:?}, abandoning in-flight requests",
                deadline
            ),
        }
    }

    info!(
        "Shutting down, {} links dropped with the store",
        startup.store.len()
    );
    Ok(())
}
