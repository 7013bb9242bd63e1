//! User repository

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::DatabaseError;

const COLUMNS: &str = "id, email, password_hash, nombre, rol, created_at, updated_at";

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct UsuarioRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub nombre: String,
    pub rol: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UsuarioRepository {
    pool: PgPool,
}

impl UsuarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<UsuarioRow, DatabaseError> {
        let sql = format!("SELECT {} FROM usuarios WHERE id = $1", COLUMNS);
        sqlx::query_as::<_, UsuarioRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Usuario", id))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UsuarioRow>, DatabaseError> {
        let sql = format!("SELECT {} FROM usuarios WHERE lower(email) = lower($1)", COLUMNS);
        let row = sqlx::query_as::<_, UsuarioRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Fails with `DuplicateEntry` when the email is taken
    pub async fn insert(&self, row: &UsuarioRow) -> Result<UsuarioRow, DatabaseError> {
        let sql = format!(
            "INSERT INTO usuarios ({cols}) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {cols}",
            cols = COLUMNS
        );
        let inserted = sqlx::query_as::<_, UsuarioRow>(&sql)
            .bind(row.id)
            .bind(&row.email)
            .bind(&row.password_hash)
            .bind(&row.nombre)
            .bind(&row.rol)
            .bind(row.created_at)
            .bind(row.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(inserted)
    }

    pub async fn update(&self, row: &UsuarioRow) -> Result<UsuarioRow, DatabaseError> {
        let sql = format!(
            "UPDATE usuarios \
             SET email = $2, password_hash = $3, nombre = $4, rol = $5, updated_at = $6 \
             WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        sqlx::query_as::<_, UsuarioRow>(&sql)
            .bind(row.id)
            .bind(&row.email)
            .bind(&row.password_hash)
            .bind(&row.nombre)
            .bind(&row.rol)
            .bind(row.updated_at)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Usuario", row.id))
    }

    pub async fn delete_all(&self) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM usuarios").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
