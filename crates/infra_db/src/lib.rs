//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the CRM using SQLx runtime queries.
//!
//! # Layout
//!
//! - [`pool`]: connection pool configuration and embedded migrations
//! - [`repositories`]: SQL per table, expressed in row types
//! - [`adapters`]: `ClientePort`, `SettingsPort` and `UserPort` implementations
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig};
//! use infra_db::adapters::PostgresClienteAdapter;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/crm")).await?;
//! run_migrations(&pool).await?;
//! let clientes = PostgresClienteAdapter::new(pool.clone());
//! ```

pub mod adapters;
pub mod error;
pub mod pool;
pub mod repositories;

pub use adapters::{PostgresClienteAdapter, PostgresSettingsAdapter, PostgresUserAdapter};
pub use error::DatabaseError;
pub use pool::{create_pool, run_migrations, DatabaseConfig, DatabasePool};
