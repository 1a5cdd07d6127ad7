use std::sync::Arc;

use anyhow::Result;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;

use daylog::config::Config;
use daylog::http::log_requests;
use daylog::logging::Logger;

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics subscriber BEFORE the logger, so bootstrap failures land
    // on stderr
    init_diagnostics();

    let config = Config::load()?;

    // Directory bootstrap and the retention scan run here, synchronously
    let logger = Arc::new(Logger::new(&config));

    let boot = logger.with_context("Bootstrap");
    boot.log("Application starting...", None);

    let app = Router::new()
        .route("/health", get(health))
        .layer(from_fn_with_state(Arc::clone(&logger), log_requests));

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    let addr = listener.local_addr()?;
    boot.log(format!("Server is running on http://{addr}"), None);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    boot.log("Application shutting down", None);
    logger.flush();
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
}

/// Install the stderr subscriber for the subsystem's own side-channel
/// diagnostics (append failures, queue drops, retention results).
fn init_diagnostics() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "daylog=info".into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
