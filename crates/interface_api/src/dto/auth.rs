//! Authentication DTOs

use serde::{Deserialize, Serialize};

use core_kernel::UsuarioId;
use domain_user::{Rol, Usuario};

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub nombre: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub nombre: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// Public view of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: UsuarioId,
    pub email: String,
    pub nombre: String,
    pub rol: Rol,
}

impl From<&Usuario> for UserResponse {
    fn from(usuario: &Usuario) -> Self {
        Self {
            id: usuario.id,
            email: usuario.email.clone(),
            nombre: usuario.nombre.clone(),
            rol: usuario.rol,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserResponse,
}
