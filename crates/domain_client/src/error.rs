//! Client domain errors
//!
//! Messages are user-facing and returned verbatim in API error bodies.

use thiserror::Error;

/// Errors that can occur in the client domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("Cliente no encontrado")]
    NotFound(String),

    #[error("Empresa y contacto son campos requeridos")]
    MissingRequired,

    #[error("ID de cliente inválido")]
    InvalidId(String),

    #[error("Se requiere un array de IDs")]
    EmptyIdList,

    #[error("La fecha de fin de la póliza debe ser posterior a la fecha de inicio")]
    InvalidPolicyPeriod,

    #[error("La póliza requiere fecha de inicio y fecha de fin")]
    IncompletePolicy,

    #[error("Fecha no válida en {field}: {value}")]
    InvalidDate { field: String, value: String },

    #[error("Valor no válido en {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("mesVencimiento debe ser un número entre 1 y 12")]
    InvalidMonth(String),
}

impl ClientError {
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        ClientError::NotFound(id.to_string())
    }

    pub fn invalid_date(field: impl Into<String>, value: impl Into<String>) -> Self {
        ClientError::InvalidDate {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn invalid_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        ClientError::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }
}
