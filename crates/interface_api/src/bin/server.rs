//! CRM API server
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin crm-api
//!
//! CRM_PORT=8080 CRM_DATABASE_URL=postgres://... cargo run --bin crm-api
//! ```
//!
//! # Environment Variables
//!
//! * `CRM_HOST` - Server host (default: 0.0.0.0)
//! * `CRM_PORT` - Server port (default: 3001)
//! * `CRM_JWT_SECRET` - JWT signing secret (required in production)
//! * `CRM_JWT_EXPIRATION_SECS` - Token lifetime in seconds (default: 7 days)
//! * `CRM_DATABASE_URL` - PostgreSQL connection string
//! * `CRM_LOG_LEVEL` - Log level or filter directive (default: info)
//! * `CRM_LOG_JSON` - Emit JSON log lines (default: false)
//! * `CRM_ALLOWED_ORIGINS` - Comma-separated CORS origins
//! * `CRM_TIMEZONE` - Business timezone (default: Europe/Madrid)
//! * `CRM_ENVIRONMENT` - `development` or `production`
//! * `CRM_BCRYPT_COST` - bcrypt work factor (default: 10)

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;

use infra_db::{create_pool, run_migrations, DatabaseConfig};
use interface_api::config::ApiConfig;
use interface_api::telemetry::init_tracing;
use interface_api::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    init_tracing(&config);

    tracing::info!(
        host = %config.host,
        port = config.port,
        environment = %config.environment,
        timezone = %config.timezone,
        "Starting CRM API server"
    );

    let pool = create_pool(DatabaseConfig::new(config.database_url.clone()))
        .await
        .context("database connection failed")?;
    run_migrations(&pool).await.context("migrations failed")?;

    let addr: SocketAddr = config.server_addr().parse()?;
    let state = AppState::with_postgres(pool, config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
