//! SafeHaven server: SOS controller and safety directory API

use anyhow::Context;
use tokio::net::TcpListener;

use safehaven::{create_router, logging, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("invalid configuration")?;

    // Initialize logging
    logging::init_logging(&config.log_level, config.log_format);
    logging::log_startup();
    config.log_config();

    let state = AppState::new(&config).context("failed to build application state")?;
    let alerts = state.alerts.clone();
    let app = create_router(state, &config)?;

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(address = %addr, "SafeHaven server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Teardown ends any SOS session without notifying
    alerts.shutdown();
    tracing::info!("SafeHaven server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        logging::log_error(&err.to_string(), "install Ctrl+C handler", None);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
