use anyhow::Context;
use note_api::{router, selector, telemetry, ServerConfig};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();
    telemetry::init().context("failed to install log subscriber")?;

    let server = ServerConfig::from_env().context("invalid listener configuration")?;

    // Build the backend before accepting connections so a bad backend aborts startup.
    let backend =
        selector::global().get().await.context("failed to initialize storage backend")?;
    info!(backend = %backend.kind(), "storage backend ready");

    let listener = TcpListener::bind(server.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", server.bind_address()))?;
    info!(address = %listener.local_addr()?, "note-api listening");

    axum::serve(listener, router(selector::global()))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("note-api stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
