//! User domain errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("Email, contraseña y nombre son requeridos")]
    MissingRegistrationFields,

    #[error("Email y contraseña son requeridos")]
    MissingCredentials,

    #[error("Contraseña actual y nueva contraseña son requeridas")]
    MissingPasswords,

    #[error("Formato de email inválido")]
    InvalidEmail,

    #[error("La contraseña debe tener al menos 6 caracteres")]
    PasswordTooShort,

    #[error("La nueva contraseña debe tener al menos 6 caracteres")]
    NewPasswordTooShort,

    #[error("Email o contraseña incorrectos")]
    InvalidCredentials,

    #[error("Contraseña actual incorrecta")]
    WrongCurrentPassword,

    #[error("Ya existe un usuario con este email")]
    EmailTaken,

    #[error("Usuario no encontrado")]
    NotFound,

    #[error("Error al procesar la contraseña: {0}")]
    Hashing(String),
}

impl From<bcrypt::BcryptError> for UserError {
    fn from(err: bcrypt::BcryptError) -> Self {
        UserError::Hashing(err.to_string())
    }
}
