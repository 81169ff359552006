use std::{env, net::SocketAddr};

use axum::Router;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(host: &str, port: u16) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", host, port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {}:{}: {}", host, port, e)))
}

/// Host/port from env vars when no config file is usable
fn env_bind_addr() -> Result<SocketAddr, StartupError> {
    let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);
    bind_addr(&host, port)
}

/// Resolve bind address and database: config file first, then environment.
async fn connect_from_config() -> Result<(SocketAddr, DatabaseConnection), StartupError> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => {
            let addr = bind_addr(&cfg.server.host, cfg.server.port)?;
            let db = models::db::connect_with_config(&cfg.database).await?;
            Ok((addr, db))
        }
        Err(e) => {
            warn!(error = %e, "config_unavailable_falling_back_to_env");
            let addr = env_bind_addr()?;
            let db = models::db::connect().await?;
            Ok((addr, db))
        }
    }
}

/// Apply pending migrations and build the router over an existing connection.
pub async fn build_app(db: DatabaseConnection) -> Result<Router, StartupError> {
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Migration(e.to_string()))?;
    let state = ServerState { db };
    Ok(routes::build_router(state, build_cors()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl_c_listener_failed");
    }
    info!("shutdown_signal_received");
}

/// Public entry: load config, connect, migrate, then serve until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let (addr, db) = connect_from_config().await?;
    let app = build_app(db).await?;

    info!(%addr, "starting employee records server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}
