//! Sources of the shutdown signal.

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Cancel `token` on Ctrl+C (SIGINT), or SIGTERM on Unix.
pub fn shutdown_on_signal(token: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => info!("Received interrupt signal (Ctrl+C)"),
                Err(e) => {
                    error!("Failed to install Ctrl+C signal handler: {e}");
                    return;
                }
            },
            _ = terminate() => info!("Received terminate signal"),
            _ = token.cancelled() => return,
        }
        token.cancel();
    });
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            error!("Failed to install SIGTERM handler: {e}");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

/// Cancel `token` once `duration` has elapsed.
pub fn shutdown_after(duration: Duration, token: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(duration) => {
                info!("Run duration of {duration:?} elapsed");
                token.cancel();
            }
            _ = token.cancelled() => {}
        }
    });
}
