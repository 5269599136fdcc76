mod bootstrap;
mod health;
mod limiter;
mod routes;

use std::time::Duration;

use anyhow::Result;
use showroom_core::config::{AppConfig, LoadOptions};
use tracing::{info, warn};

fn init_logging(config: &AppConfig) {
    use showroom_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    // Now bootstrap using the same config we already loaded
    let app = bootstrap::bootstrap_with_config(config).await?;

    let limiter = limiter::RateLimiter::per_minute(app.config.server.chat_rate_limit_per_minute);
    let router = routes::router(app.chat_runtime.clone(), limiter)
        .merge(health::router(app.db_pool.clone()));

    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(
        event_name = "system.server.started",
        correlation_id = "bootstrap",
        bind_address = %address,
        "chat transport listening"
    );

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
    });

    tokio::select! {
        served = &mut server => {
            served??;
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!(
                event_name = "system.server.stopping",
                correlation_id = "shutdown",
                "shutdown signal received, draining in-flight requests"
            );
            let _ = shutdown_tx.send(());

            let drain = Duration::from_secs(app.config.server.graceful_shutdown_secs);
            match tokio::time::timeout(drain, server).await {
                Ok(served) => served??,
                Err(_) => warn!(
                    event_name = "system.server.drain_timeout",
                    correlation_id = "shutdown",
                    "graceful shutdown deadline reached before requests drained"
                ),
            }
        }
    }

    info!(
        event_name = "system.server.stopped",
        correlation_id = "shutdown",
        "chat transport stopped"
    );
    Ok(())
}
