//! Account handlers
//!
//! bcrypt work runs on the blocking pool so it never stalls the runtime.

use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::{info, warn};

use domain_user::{
    normalize_email, NewUsuario, Rol, UserError, UserPortExt, Usuario, UsuarioChanges,
};

use crate::auth::create_token;
use crate::dto::auth::{
    AuthResponse, ChangePasswordRequest, LoginRequest, MeResponse, ProfileResponse,
    RegisterRequest, UpdateProfileRequest, UserResponse,
};
use crate::dto::MessageResponse;
use crate::error::{ApiError, ApiJson};
use crate::middleware::CurrentUser;
use crate::AppState;

fn issue_token(state: &AppState, usuario: &Usuario) -> Result<String, ApiError> {
    create_token(usuario, &state.config.jwt_secret, state.config.jwt_expiration_secs)
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// Creates an account and signs it in
///
/// Accounts created here get the admin role.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let input = NewUsuario {
        email: request.email.unwrap_or_default(),
        password: request.password.unwrap_or_default(),
        nombre: request.nombre.unwrap_or_default(),
        rol: Rol::Admin,
    };
    let email = input.validate()?;
    if state.usuarios.email_taken(&email).await? {
        return Err(UserError::EmailTaken.into());
    }

    let cost = state.config.bcrypt_cost;
    let usuario = tokio::task::spawn_blocking(move || Usuario::register(input, cost)).await??;
    let stored = state.usuarios.insert(&usuario).await?;
    info!(user = %stored.id, email = %stored.email, "User registered");

    let token = issue_token(&state, &stored)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "Usuario registrado exitosamente".to_string(),
            token,
            user: UserResponse::from(&stored),
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = normalize_email(request.email.as_deref().unwrap_or_default());
    let password = request.password.unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(UserError::MissingCredentials.into());
    }

    let Some(usuario) = state.usuarios.find_by_email(&email).await? else {
        warn!(email = %email, "Login attempt for unknown email");
        return Err(UserError::InvalidCredentials.into());
    };
    let (usuario, valid) = tokio::task::spawn_blocking(move || {
        let valid = usuario.check_password(&password);
        (usuario, valid)
    })
    .await?;
    if !valid {
        warn!(user = %usuario.id, "Login attempt with wrong password");
        return Err(UserError::InvalidCredentials.into());
    }

    let token = issue_token(&state, &usuario)?;
    Ok(Json(AuthResponse {
        message: "Login exitoso".to_string(),
        token,
        user: UserResponse::from(&usuario),
    }))
}

pub async fn me(Extension(CurrentUser(usuario)): Extension<CurrentUser>) -> Json<MeResponse> {
    Json(MeResponse {
        user: UserResponse::from(&usuario),
    })
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(CurrentUser(mut usuario)): Extension<CurrentUser>,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    if let Some(email) = request.email.as_deref().map(normalize_email) {
        if !email.is_empty() && email != usuario.email && state.usuarios.email_taken(&email).await? {
            return Err(UserError::EmailTaken.into());
        }
    }

    usuario.apply(UsuarioChanges {
        nombre: request.nombre,
        email: request.email,
    })?;
    let stored = state.usuarios.update(&usuario).await?;

    Ok(Json(ProfileResponse {
        message: "Perfil actualizado exitosamente".to_string(),
        user: UserResponse::from(&stored),
    }))
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(CurrentUser(mut usuario)): Extension<CurrentUser>,
    ApiJson(request): ApiJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let actual = request.current_password.unwrap_or_default();
    let nueva = request.new_password.unwrap_or_default();
    let cost = state.config.bcrypt_cost;

    let usuario = tokio::task::spawn_blocking(move || {
        usuario.change_password(&actual, &nueva, cost).map(|_| usuario)
    })
    .await??;
    state.usuarios.update(&usuario).await?;
    info!(user = %usuario.id, "Password changed");

    Ok(Json(MessageResponse::new("Contraseña actualizada exitosamente")))
}
