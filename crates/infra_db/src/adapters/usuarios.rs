//! PostgreSQL user adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError, UsuarioId};
use domain_user::{Rol, UserError, UserPort, Usuario};

use crate::error::DatabaseError;
use crate::repositories::usuarios::{UsuarioRepository, UsuarioRow};

const ADAPTER_ID: &str = "postgres-user-adapter";

#[derive(Debug, Clone)]
pub struct PostgresUserAdapter {
    repository: UsuarioRepository,
    pool: PgPool,
}

impl PostgresUserAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UsuarioRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn repository(&self) -> &UsuarioRepository {
        &self.repository
    }
}

impl DomainPort for PostgresUserAdapter {}

#[async_trait]
impl HealthCheckable for PostgresUserAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, ADAPTER_ID).await
    }
}

#[async_trait]
impl UserPort for PostgresUserAdapter {
    #[instrument(skip(self), fields(usuario_id = %id))]
    async fn get(&self, id: UsuarioId) -> Result<Usuario, PortError> {
        let row = self
            .repository
            .get_by_id(*id.as_uuid())
            .await
            .map_err(|e| translate(e, Some(id)))?;
        Ok(row_to_usuario(row)?)
    }

    #[instrument(skip(self, email))]
    async fn find_by_email(&self, email: &str) -> Result<Option<Usuario>, PortError> {
        let row = self.repository.find_by_email(email).await?;
        Ok(row.map(row_to_usuario).transpose()?)
    }

    #[instrument(skip(self, usuario), fields(usuario_id = %usuario.id))]
    async fn insert(&self, usuario: &Usuario) -> Result<Usuario, PortError> {
        let stored = self
            .repository
            .insert(&usuario_to_row(usuario))
            .await
            .map_err(|e| translate(e, None))?;
        debug!("Inserted usuario");
        Ok(row_to_usuario(stored)?)
    }

    #[instrument(skip(self, usuario), fields(usuario_id = %usuario.id))]
    async fn update(&self, usuario: &Usuario) -> Result<Usuario, PortError> {
        let stored = self
            .repository
            .update(&usuario_to_row(usuario))
            .await
            .map_err(|e| translate(e, Some(usuario.id)))?;
        Ok(row_to_usuario(stored)?)
    }
}

/// The only unique constraint on `usuarios` besides the key is the email
fn translate(error: DatabaseError, id: Option<UsuarioId>) -> PortError {
    match (error, id) {
        (DatabaseError::DuplicateEntry(_), _) => PortError::conflict(UserError::EmailTaken.to_string()),
        (e, Some(id)) if e.is_not_found() => PortError::not_found("Usuario", id),
        (e, _) => e.into(),
    }
}

fn usuario_to_row(usuario: &Usuario) -> UsuarioRow {
    UsuarioRow {
        id: *usuario.id.as_uuid(),
        email: usuario.email.clone(),
        password_hash: usuario.password_hash.clone(),
        nombre: usuario.nombre.clone(),
        rol: usuario.rol.as_str().to_string(),
        created_at: usuario.created_at,
        updated_at: usuario.updated_at,
    }
}

fn row_to_usuario(row: UsuarioRow) -> Result<Usuario, DatabaseError> {
    let rol = row
        .rol
        .parse::<Rol>()
        .map_err(|_| DatabaseError::serialization("rol", &row.rol))?;
    Ok(Usuario {
        id: UsuarioId::from_uuid(row.id),
        email: row.email,
        password_hash: row.password_hash,
        nombre: row.nombre,
        rol,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
