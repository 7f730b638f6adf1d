use std::sync::Arc;

use anyhow::Context;
use lms_server::{api, config::ServerConfig, db};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    info!("starting lms server");
    let config = ServerConfig::load().context("failed to load server config")?;

    let db = db::init_pool_and_migrate(config.database_url.as_str())
        .await
        .context("failed to initialize database")?;

    let state = api::AppState::new(db, &config).context("failed to build application state")?;

    if let Some(seed) = &config.admin {
        let created = state
            .accounts
            .ensure_admin(seed)
            .await
            .context("failed to seed admin account")?;
        if !created {
            info!(username = %seed.username, "admin account already present");
        }
    }

    let app = api::create_router(Arc::new(state), &config.cors_allowed_origins);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "server is ready, press Ctrl+C to shut down");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received, stopping server");
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
