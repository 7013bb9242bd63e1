//! Authentication tokens

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::UsuarioId;
use domain_user::{Rol, Usuario};

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID, bare UUID)
    pub sub: String,
    pub email: String,
    pub rol: Rol,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<UsuarioId, AuthError> {
        self.sub.parse().map_err(|_| AuthError::InvalidToken)
    }
}

/// Auth errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Token could not be signed: {0}")]
    Signing(String),
}

/// Issues an HS256 token for `usuario`, valid for `expiration_secs`
pub fn create_token(
    usuario: &Usuario,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let lifetime = i64::try_from(expiration_secs).unwrap_or(i64::MAX / 1000);
    let exp = now + Duration::seconds(lifetime);

    let claims = Claims {
        sub: usuario.id.as_uuid().to_string(),
        email: usuario.email.clone(),
        rol: usuario.rol,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Signing(e.to_string()))
}

/// Validates signature and expiry
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// Extracts the token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_user::NewUsuario;

    const SECRET: &str = "test-secret";

    fn usuario() -> Usuario {
        Usuario::register(
            NewUsuario {
                email: "ana@correduria.es".to_string(),
                password: "secreto1".to_string(),
                nombre: "Ana".to_string(),
                rol: Rol::Admin,
            },
            4,
        )
        .unwrap()
    }

    #[test]
    fn test_token_round_trip() {
        let u = usuario();
        let token = create_token(&u, SECRET, 3600).unwrap();
        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.user_id().unwrap(), u.id);
        assert_eq!(claims.email, "ana@correduria.es");
        assert_eq!(claims.rol, Rol::Admin);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(&usuario(), SECRET, 3600).unwrap();
        assert_eq!(validate_token(&token, "other"), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_expired_token_rejected() {
        let u = usuario();
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            sub: u.id.as_uuid().to_string(),
            email: u.email.clone(),
            rol: u.rol,
            exp: past.timestamp(),
            iat: (past - Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert_eq!(validate_token(&token, SECRET), Err(AuthError::TokenExpired));
    }

    #[test]
    fn test_bearer_header_parsing() {
        assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic abc"), None);
    }
}
