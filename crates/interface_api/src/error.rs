//! API error handling
//!
//! Every failure leaves the API as `{"error": "<mensaje>"}` with the status
//! chosen here. Domain errors already carry user-facing Spanish messages;
//! internal failures are logged and replaced by a generic one.

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::PortError;
use domain_client::ClientError;
use domain_expiration::ExpirationError;
use domain_settings::SettingsError;
use domain_user::UserError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Unhandled API error");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { entity_type, .. } => {
                ApiError::NotFound(format!("{} no encontrado", entity_type))
            }
            PortError::Validation { message, .. } => ApiError::BadRequest(message),
            PortError::Conflict { message } => ApiError::Conflict(message),
            other @ (PortError::Connection { .. } | PortError::Internal { .. }) => {
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound(_) => ApiError::NotFound(err.to_string()),
            _ => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<ExpirationError> for ApiError {
    fn from(err: ExpirationError) -> Self {
        match err {
            ExpirationError::Client(inner) => inner.into(),
            _ => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<SettingsError> for ApiError {
    fn from(err: SettingsError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidCredentials | UserError::WrongCurrentPassword => {
                ApiError::Unauthorized(err.to_string())
            }
            UserError::EmailTaken => ApiError::Conflict(err.to_string()),
            UserError::NotFound => ApiError::NotFound(err.to_string()),
            UserError::Hashing(_) => ApiError::Internal(err.to_string()),
            _ => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Cuerpo JSON no válido: {}", rejection.body_text()))
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("blocking task failed: {}", err))
    }
}

/// `Json` whose rejections use the API error body
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl<T: Serialize> IntoResponse for ApiJson<T> {
    fn into_response(self) -> Response {
        Json(self.0).into_response()
    }
}
