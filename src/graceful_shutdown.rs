//! Graceful shutdown

use tokio::signal;

/// Handler for graceful shutdown
///
/// Resolves on Ctrl+C or, on Unix, SIGTERM. When a signal handler can not be
/// installed that signal is ignored and the other one still counts.
pub async fn handler() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Could not listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(err) => {
                tracing::error!("Could not listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Terminate signal received, starting graceful shutdown");
}
