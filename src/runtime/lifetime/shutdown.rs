use std::future::Future;

use actix_web::dev::ServerHandle;
use tokio::signal;
use tracing::{info, warn};

use super::startup::StartupContext;

/// 等待 Ctrl+C 或 SIGTERM，然后优雅停止 HTTP 服务器（等待进行中的请求完成）
pub async fn listen_for_shutdown(server: ServerHandle) {
    shutdown_on(server, wait_for_signal()).await;
}

/// Gracefully stop `server` once `trigger` resolves.
pub async fn shutdown_on<F>(server: ServerHandle, trigger: F)
where
    F: Future<Output = ()>,
{
    trigger.await;
    info!("Shutdown signal received, draining in-flight requests...");
    server.stop(true).await;
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

/// Release background tasks and the store once the server has stopped.
///
/// The store must only be closed after every worker is gone, so this runs
/// after the server future has resolved.
pub async fn close(ctx: StartupContext) {
    ctx.sweeper.shutdown().await;

    let path = ctx.link_service.store().path().to_path_buf();
    drop(ctx.link_service);

    info!("Link store {} closed, shutting down...", path.display());
}
