use anyhow::Context;
use pension_server::{AppState, Config, DbService, build_app, logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("configuration error: {e}"))?;
    let _log_guard = logger::init_logger(&config.log_level, config.log_dir.as_deref());

    tracing::info!(environment = %config.environment, "Starting pension-server");

    let db = DbService::new(
        &config.database_url,
        config.db_max_connections,
        config.db_acquire_timeout,
    )
    .await
    .context("database initialization failed")?;

    let addr = format!("0.0.0.0:{}", config.http_port);
    let state = AppState::new(config, db).context("state initialization failed")?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("HTTP listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("pension-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
