// backend/services/interaction/read-consumer/src/main.rs

use interaction::infrastructure::bootstrap::run_read_event_consumer;
use shared_kernel::errors::AppResult;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let shutdown = CancellationToken::new();

    // Ctrl+C : le batch en cours est flushé avant la sortie
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Shutdown signal received, stopping read consumer...");
                    shutdown.cancel();
                }
                Err(e) => tracing::error!(error = %e, "Unable to listen for shutdown signal"),
            }
        }
    });

    run_read_event_consumer(shutdown).await
}
