//! CRM accounts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::UsuarioId;

use crate::credentials::{normalize_email, validate_email, validate_password};
use crate::error::UserError;
use crate::password::{hash_password, verify_password};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rol {
    Admin,
    #[default]
    Usuario,
}

impl Rol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rol::Admin => "admin",
            Rol::Usuario => "usuario",
        }
    }
}

impl fmt::Display for Rol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Rol::Admin),
            "usuario" => Ok(Rol::Usuario),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// A registered account. The hash never leaves the process in serialized form.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Usuario {
    pub id: UsuarioId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub nombre: String,
    pub rol: Rol,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for Usuario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Usuario")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("nombre", &self.nombre)
            .field("rol", &self.rol)
            .finish_non_exhaustive()
    }
}

/// Registration input
#[derive(Debug, Clone, Default)]
pub struct NewUsuario {
    pub email: String,
    pub password: String,
    pub nombre: String,
    pub rol: Rol,
}

/// Profile edits; blank values leave the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsuarioChanges {
    pub nombre: Option<String>,
    pub email: Option<String>,
}

impl NewUsuario {
    /// Checks the registration without hashing; returns the normalized email
    pub fn validate(&self) -> Result<String, UserError> {
        let email = normalize_email(&self.email);
        if email.is_empty() || self.password.is_empty() || self.nombre.trim().is_empty() {
            return Err(UserError::MissingRegistrationFields);
        }
        validate_email(&email)?;
        validate_password(&self.password)?;
        Ok(email)
    }
}

impl Usuario {
    /// Validates the registration and hashes the password with `cost`
    pub fn register(input: NewUsuario, cost: u32) -> Result<Self, UserError> {
        let email = input.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: UsuarioId::new(),
            email,
            password_hash: hash_password(&input.password, cost)?,
            nombre: input.nombre.trim().to_string(),
            rol: input.rol,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn check_password(&self, plain: &str) -> bool {
        verify_password(plain, &self.password_hash)
    }

    /// Applies profile edits. Uniqueness of a new email is enforced by storage.
    pub fn apply(&mut self, changes: UsuarioChanges) -> Result<(), UserError> {
        let nombre = changes
            .nombre
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let email = changes
            .email
            .map(|e| normalize_email(&e))
            .filter(|e| !e.is_empty());

        if let Some(email) = &email {
            validate_email(email)?;
        }
        if nombre.is_none() && email.is_none() {
            return Ok(());
        }
        if let Some(nombre) = nombre {
            self.nombre = nombre;
        }
        if let Some(email) = email {
            self.email = email;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Replaces the password after checking the current one
    pub fn change_password(&mut self, actual: &str, nueva: &str, cost: u32) -> Result<(), UserError> {
        if actual.is_empty() || nueva.is_empty() {
            return Err(UserError::MissingPasswords);
        }
        validate_password(nueva).map_err(|_| UserError::NewPasswordTooShort)?;
        if !self.check_password(actual) {
            return Err(UserError::WrongCurrentPassword);
        }
        self.password_hash = hash_password(nueva, cost)?;
        self.updated_at = Utc::now();
        Ok(())
    }
}
