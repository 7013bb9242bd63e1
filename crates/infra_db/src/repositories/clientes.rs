//! Client repository
//!
//! Clients live in a single flat `clientes` table; the policy and the five
//! renewal dates are stored as `poliza_*` and `venc_*` columns. List filters
//! arrive as a domain [`Predicate`] and are compiled to a parameterised
//! `WHERE` clause here.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use domain_client::Predicate;

use crate::error::DatabaseError;

const COLUMNS: &str = "id, empresa, contacto, cif, telefono, correo, direccion, notas, \
    estado, tipo_carga, transporte, \
    poliza_aseguradora, poliza_num_poliza, poliza_fecha_inicio, poliza_fecha_fin, poliza_prima, \
    venc_rc, venc_mercancias, venc_acc, venc_flotas, venc_pyme, \
    num_vehiculos, facturacion, fecha_llamada, estado_conversacion, created_at, updated_at";

const SEARCH_COLUMNS: [&str; 4] = ["empresa", "contacto", "telefono", "correo"];

const EXPIRATION_COLUMNS: &str =
    "poliza_fecha_fin, venc_rc, venc_mercancias, venc_acc, venc_flotas, venc_pyme";

/// One row of `clientes`
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ClienteRow {
    pub id: Uuid,
    pub empresa: String,
    pub contacto: String,
    pub cif: Option<String>,
    pub telefono: Option<String>,
    pub correo: Option<String>,
    pub direccion: Option<String>,
    pub notas: Option<String>,
    pub estado: Option<String>,
    pub tipo_carga: Option<String>,
    pub transporte: Option<String>,
    pub poliza_aseguradora: Option<String>,
    pub poliza_num_poliza: Option<String>,
    pub poliza_fecha_inicio: Option<NaiveDate>,
    pub poliza_fecha_fin: Option<NaiveDate>,
    pub poliza_prima: Option<Decimal>,
    pub venc_rc: Option<NaiveDate>,
    pub venc_mercancias: Option<NaiveDate>,
    pub venc_acc: Option<NaiveDate>,
    pub venc_flotas: Option<NaiveDate>,
    pub venc_pyme: Option<NaiveDate>,
    pub num_vehiculos: Option<i32>,
    pub facturacion: Option<String>,
    pub fecha_llamada: Option<NaiveDate>,
    pub estado_conversacion: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ClienteRepository {
    pool: PgPool,
}

impl ClienteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Rows matching `predicate`, newest first
    pub async fn list(&self, predicate: &Predicate) -> Result<Vec<ClienteRow>, DatabaseError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM clientes WHERE ", COLUMNS));
        push_predicate(&mut qb, predicate);
        qb.push(" ORDER BY created_at DESC, id DESC");

        let rows = qb.build_query_as::<ClienteRow>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ClienteRow, DatabaseError> {
        let sql = format!("SELECT {} FROM clientes WHERE id = $1", COLUMNS);
        sqlx::query_as::<_, ClienteRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Cliente", id))
    }

    pub async fn insert(&self, row: &ClienteRow) -> Result<ClienteRow, DatabaseError> {
        let sql = format!(
            "INSERT INTO clientes ({cols}) VALUES \
             ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, \
              $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27) \
             RETURNING {cols}",
            cols = COLUMNS
        );
        let query = sqlx::query_as::<_, ClienteRow>(&sql).bind(row.id);
        let inserted = bind_fields(query, row)
            .bind(row.created_at)
            .bind(row.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(inserted)
    }

    /// Overwrites every mutable column; `created_at` is left untouched
    pub async fn update(&self, row: &ClienteRow) -> Result<ClienteRow, DatabaseError> {
        let sql = format!(
            "UPDATE clientes SET \
             empresa = $2, contacto = $3, cif = $4, telefono = $5, correo = $6, \
             direccion = $7, notas = $8, estado = $9, tipo_carga = $10, transporte = $11, \
             poliza_aseguradora = $12, poliza_num_poliza = $13, poliza_fecha_inicio = $14, \
             poliza_fecha_fin = $15, poliza_prima = $16, \
             venc_rc = $17, venc_mercancias = $18, venc_acc = $19, venc_flotas = $20, venc_pyme = $21, \
             num_vehiculos = $22, facturacion = $23, fecha_llamada = $24, \
             estado_conversacion = $25, updated_at = $26 \
             WHERE id = $1 \
             RETURNING {}",
            COLUMNS
        );
        let query = sqlx::query_as::<_, ClienteRow>(&sql).bind(row.id);
        bind_fields(query, row)
            .bind(row.updated_at)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Cliente", row.id))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM clientes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Cliente", id));
        }
        Ok(())
    }

    /// Deletes every listed id that exists and returns the count
    pub async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM clientes WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_all(&self) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM clientes").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

/// Binds `$2..=$25`, the columns between `id` and the timestamps
fn bind_fields<'q>(
    query: QueryAs<'q, Postgres, ClienteRow, PgArguments>,
    row: &'q ClienteRow,
) -> QueryAs<'q, Postgres, ClienteRow, PgArguments> {
    query
        .bind(&row.empresa)
        .bind(&row.contacto)
        .bind(&row.cif)
        .bind(&row.telefono)
        .bind(&row.correo)
        .bind(&row.direccion)
        .bind(&row.notas)
        .bind(&row.estado)
        .bind(&row.tipo_carga)
        .bind(&row.transporte)
        .bind(&row.poliza_aseguradora)
        .bind(&row.poliza_num_poliza)
        .bind(row.poliza_fecha_inicio)
        .bind(row.poliza_fecha_fin)
        .bind(row.poliza_prima)
        .bind(row.venc_rc)
        .bind(row.venc_mercancias)
        .bind(row.venc_acc)
        .bind(row.venc_flotas)
        .bind(row.venc_pyme)
        .bind(row.num_vehiculos)
        .bind(&row.facturacion)
        .bind(row.fecha_llamada)
        .bind(&row.estado_conversacion)
}

/// Appends the SQL form of `predicate` to `qb`
pub fn push_predicate(qb: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
    match predicate {
        Predicate::All(parts) if parts.is_empty() => {
            qb.push("TRUE");
        }
        Predicate::Any(parts) if parts.is_empty() => {
            qb.push("FALSE");
        }
        Predicate::All(parts) => push_joined(qb, parts, " AND "),
        Predicate::Any(parts) => push_joined(qb, parts, " OR "),
        Predicate::TextSearch(needle) => {
            let pattern = format!("%{}%", escape_like(needle));
            qb.push("(");
            for (i, column) in SEARCH_COLUMNS.iter().enumerate() {
                if i > 0 {
                    qb.push(" OR ");
                }
                qb.push(*column).push(" ILIKE ").push_bind(pattern.clone());
            }
            qb.push(")");
        }
        Predicate::OneOf { values, .. } if values.is_empty() => {
            qb.push("FALSE");
        }
        Predicate::OneOf { field, values } => {
            qb.push(field.column())
                .push(" = ANY(")
                .push_bind(values.clone())
                .push(")");
        }
        Predicate::Unset(field) => {
            qb.push(format!("({col} IS NULL OR {col} = '')", col = field.column()));
        }
        Predicate::DateInRange { field, range } => {
            qb.push("(")
                .push(field.column())
                .push(" BETWEEN ")
                .push_bind(range.start)
                .push(" AND ")
                .push_bind(range.end)
                .push(")");
        }
        Predicate::AnyExpirationInRange(range) => {
            qb.push(format!(
                "EXISTS (SELECT 1 FROM unnest(ARRAY[{}]) AS d(fecha) WHERE d.fecha BETWEEN ",
                EXPIRATION_COLUMNS
            ))
            .push_bind(range.start)
            .push(" AND ")
            .push_bind(range.end)
            .push(")");
        }
    }
}

fn push_joined(qb: &mut QueryBuilder<'_, Postgres>, parts: &[Predicate], separator: &str) {
    qb.push("(");
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            qb.push(separator);
        }
        push_predicate(qb, part);
    }
    qb.push(")");
}

/// Escapes LIKE metacharacters so the needle matches literally
pub fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
