//! Expiration domain errors

use thiserror::Error;

use domain_client::ClientError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpirationError {
    #[error("days debe ser un número entero no negativo")]
    InvalidDays(String),

    #[error("mes debe ser un número entre 1 y 12")]
    InvalidMonth(String),

    #[error(transparent)]
    Client(#[from] ClientError),
}
