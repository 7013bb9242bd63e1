//! Database error types
//!
//! Repositories return [`DatabaseError`]; adapters turn it into a
//! [`PortError`] before it leaves the crate.

use thiserror::Error;

use core_kernel::PortError;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("{0}")]
    NotFound(String),

    /// Unique constraint violation (SQLSTATE 23505)
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Check constraint violation (SQLSTATE 23514)
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A stored value does not map back to a domain type
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DatabaseError {
    /// ```rust
    /// use infra_db::DatabaseError;
    ///
    /// let error = DatabaseError::not_found("Cliente", "0190c0de");
    /// assert_eq!(error.to_string(), "Cliente 0190c0de no existe");
    /// assert!(error.is_not_found());
    /// ```
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound(format!("{} {} no existe", entity, id))
    }

    pub fn serialization(column: &str, value: impl std::fmt::Display) -> Self {
        DatabaseError::SerializationError(format!("unexpected value in {}: {}", column, value))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound(_))
    }

    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted
        )
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("row not found".to_string()),
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                DatabaseError::ConnectionFailed(error.to_string())
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                DatabaseError::SerializationError(error.to_string())
            }
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                match db_err.code().as_deref() {
                    Some("23505") => DatabaseError::DuplicateEntry(message),
                    Some("23514") => DatabaseError::ConstraintViolation(message),
                    _ => DatabaseError::QueryFailed(message),
                }
            }
            _ => DatabaseError::QueryFailed(error.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DatabaseError {
    fn from(error: sqlx::migrate::MigrateError) -> Self {
        DatabaseError::MigrationFailed(error.to_string())
    }
}

/// Fallback translation; adapters that know the entity map `NotFound` and
/// `DuplicateEntry` themselves first.
impl From<DatabaseError> for PortError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound(message) => PortError::not_found("Registro", message),
            DatabaseError::DuplicateEntry(message) => PortError::conflict(message),
            DatabaseError::ConstraintViolation(message) => PortError::validation(message),
            e @ (DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted) => {
                PortError::Connection {
                    message: e.to_string(),
                    source: Some(Box::new(e)),
                }
            }
            e => PortError::internal_from(e.to_string(), e),
        }
    }
}
