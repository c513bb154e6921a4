//! Server mode
//!
//! Builds the actix-web server around the shared `LinkService` and runs it
//! until a shutdown signal arrives.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, middleware::DefaultHeaders};
use anyhow::Result;
use tracing::{info, warn};

use crate::api;
use crate::config::StaticConfig;
use crate::runtime::lifetime;

/// Graceful stop budget for in-flight requests (seconds)
const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Run the HTTP server
///
/// This function:
/// 1. Opens the store and starts the expiry sweeper
/// 2. Configures and starts the HTTP server
/// 3. Waits for Ctrl+C or SIGTERM, drains requests, then closes the store
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: Arc<StaticConfig>) -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup(&config)
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {:#}", e);
            e
        })?;

    let link_service = startup.link_service.clone();
    let api_key = startup.api_key.clone();

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(
                DefaultHeaders::new()
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .configure(api::configure(link_service.clone(), api_key.clone()))
    })
    .keep_alive(Duration::from_secs(30))
    .client_request_timeout(Duration::from_millis(5000))
    .client_disconnect_timeout(Duration::from_millis(1000))
    .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
    // 信号由 listen_for_shutdown 处理，确保存储在请求排空后才关闭
    .disable_signals()
    .workers(cpu_count)
    .bind(&bind_address)?
    .run();

    warn!("Starting server at http://{}", bind_address);

    let shutdown = actix_web::rt::spawn(lifetime::shutdown::listen_for_shutdown(server.handle()));

    let result = server.await;
    shutdown.abort();

    lifetime::shutdown::close(startup).await;
    info!("Server stopped");

    result.map_err(Into::into)
}
