//! Port adapters
//!
//! PostgreSQL implementations of the domain ports. Each adapter wraps a
//! repository, converts rows to domain types, and translates
//! [`DatabaseError`](crate::DatabaseError) into `PortError`.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_client::ClientePort;
//! use infra_db::adapters::PostgresClienteAdapter;
//!
//! let port: Arc<dyn ClientePort> = Arc::new(PostgresClienteAdapter::new(pool));
//! ```

use sqlx::PgPool;

use core_kernel::HealthCheckResult;

pub mod clientes;
pub mod settings;
pub mod usuarios;

pub use clientes::PostgresClienteAdapter;
pub use settings::PostgresSettingsAdapter;
pub use usuarios::PostgresUserAdapter;

/// `SELECT 1` round trip used by every adapter's health check
pub(crate) async fn ping(pool: &PgPool, adapter_id: &str) -> HealthCheckResult {
    let start = std::time::Instant::now();
    let result = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthCheckResult::healthy(adapter_id, latency_ms),
        Err(e) => HealthCheckResult::unhealthy(adapter_id, latency_ms, format!("Database error: {}", e)),
    }
}
