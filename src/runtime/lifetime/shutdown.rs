use tokio::signal;
use tracing::warn;

/// 等待 Ctrl+C（unix 下还包括 SIGTERM）
pub async fn listen_for_shutdown() {
    #[cfg(unix)]
    {
        let mut terminate = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
                warn!("Shutdown signal received, initiating graceful shutdown...");
                return;
            }
        };
        tokio::select! {
            res = signal::ctrl_c() => res.expect("Failed to listen for Ctrl+C"),
            _ = terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");

    warn!("Shutdown signal received, initiating graceful shutdown...");
}
