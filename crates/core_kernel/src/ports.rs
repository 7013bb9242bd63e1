//! Ports and adapters plumbing
//!
//! Each domain crate defines its own storage port (`ClientePort`,
//! `SettingsPort`, `UserPort`) on top of the marker traits here. The
//! PostgreSQL adapters in `infra_db` implement them for production, and the
//! in-memory `mock` modules implement them for tests.
//!
//! ```text
//!   interface_api handlers
//!            │
//!            ▼
//!   ClientePort / SettingsPort / UserPort   (domain crates)
//!        ▲                    ▲
//!        │                    │
//!   Postgres*Adapter     InMemory* mocks
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Failure reported by any storage port
///
/// The HTTP layer maps each variant to a status code in one place, so
/// adapters never decide response codes themselves.
#[derive(Debug, Error)]
pub enum PortError {
    #[error("{entity_type} {id} no encontrado")]
    NotFound { entity_type: String, id: String },

    /// Rejected by a storage constraint; `message` is shown to the user
    #[error("{message}")]
    Validation { message: String },

    /// Clashes with stored data, e.g. an email already in use
    #[error("{message}")]
    Conflict { message: String },

    /// The store could not be reached
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an unexpected store failure, keeping it as the error source
    pub fn internal_from<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PortError::Internal {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }

    /// Store outages, as opposed to problems with the request
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Connection { .. })
    }
}

/// Marker trait for all domain ports
///
/// Ports are shared across request handlers behind `Arc<dyn ...>`, so they
/// must be thread-safe.
pub trait DomainPort: Send + Sync + 'static {}

/// Health status for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    Unhealthy,
}

/// Health check result for an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub adapter_id: String,
    pub status: AdapterHealth,
    pub latency_ms: u64,
    pub message: Option<String>,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    pub fn healthy(adapter_id: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status: AdapterHealth::Healthy,
            latency_ms,
            message: None,
            checked_at: chrono::Utc::now(),
        }
    }

    pub fn unhealthy(adapter_id: impl Into<String>, latency_ms: u64, message: impl Into<String>) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status: AdapterHealth::Unhealthy,
            latency_ms,
            message: Some(message.into()),
            checked_at: chrono::Utc::now(),
        }
    }
}

/// Trait for adapters that support health checks
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    async fn health_check(&self) -> HealthCheckResult;
}
