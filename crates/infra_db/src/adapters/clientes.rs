//! PostgreSQL client adapter

use async_trait::async_trait;
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{ClienteId, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_client::{
    Cliente, ClientePort, EstadoCliente, Poliza, Predicate, Transporte, Vencimientos,
};

use crate::error::DatabaseError;
use crate::repositories::clientes::{ClienteRepository, ClienteRow};

const ADAPTER_ID: &str = "postgres-cliente-adapter";

#[derive(Debug, Clone)]
pub struct PostgresClienteAdapter {
    repository: ClienteRepository,
    pool: sqlx::PgPool,
}

impl PostgresClienteAdapter {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self {
            repository: ClienteRepository::new(pool.clone()),
            pool,
        }
    }

    /// Direct table access for maintenance tasks such as seeding
    pub fn repository(&self) -> &ClienteRepository {
        &self.repository
    }
}

impl DomainPort for PostgresClienteAdapter {}

#[async_trait]
impl HealthCheckable for PostgresClienteAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, ADAPTER_ID).await
    }
}

#[async_trait]
impl ClientePort for PostgresClienteAdapter {
    #[instrument(skip(self, predicate))]
    async fn list(&self, predicate: &Predicate) -> Result<Vec<Cliente>, PortError> {
        let rows = self.repository.list(predicate).await?;
        debug!(count = rows.len(), "Listed clientes");
        rows.into_iter()
            .map(|row| row_to_cliente(row).map_err(PortError::from))
            .collect()
    }

    #[instrument(skip(self), fields(cliente_id = %id))]
    async fn get(&self, id: ClienteId) -> Result<Cliente, PortError> {
        let row = self
            .repository
            .get_by_id(*id.as_uuid())
            .await
            .map_err(|e| not_found_as(e, id))?;
        Ok(row_to_cliente(row)?)
    }

    #[instrument(skip(self, cliente), fields(cliente_id = %cliente.id))]
    async fn insert(&self, cliente: &Cliente) -> Result<Cliente, PortError> {
        let row = cliente_to_row(cliente)?;
        let stored = self.repository.insert(&row).await?;
        debug!("Inserted cliente");
        Ok(row_to_cliente(stored)?)
    }

    #[instrument(skip(self, cliente), fields(cliente_id = %cliente.id))]
    async fn update(&self, cliente: &Cliente) -> Result<Cliente, PortError> {
        let row = cliente_to_row(cliente)?;
        let stored = self
            .repository
            .update(&row)
            .await
            .map_err(|e| not_found_as(e, cliente.id))?;
        Ok(row_to_cliente(stored)?)
    }

    #[instrument(skip(self), fields(cliente_id = %id))]
    async fn delete(&self, id: ClienteId) -> Result<(), PortError> {
        self.repository
            .delete(*id.as_uuid())
            .await
            .map_err(|e| not_found_as(e, id))
    }

    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    async fn delete_many(&self, ids: &[ClienteId]) -> Result<u64, PortError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let deleted = self.repository.delete_many(&uuids).await?;
        debug!(deleted, "Bulk deleted clientes");
        Ok(deleted)
    }
}

fn not_found_as(error: DatabaseError, id: ClienteId) -> PortError {
    if error.is_not_found() {
        PortError::not_found("Cliente", id)
    } else {
        error.into()
    }
}

pub(crate) fn cliente_to_row(cliente: &Cliente) -> Result<ClienteRow, DatabaseError> {
    let poliza = cliente.poliza.as_ref();
    let venc = cliente.vencimientos.unwrap_or_default();
    let num_vehiculos = cliente
        .num_vehiculos
        .map(|n| i32::try_from(n).map_err(|_| DatabaseError::serialization("num_vehiculos", n)))
        .transpose()?;

    Ok(ClienteRow {
        id: *cliente.id.as_uuid(),
        empresa: cliente.empresa.clone(),
        contacto: cliente.contacto.clone(),
        cif: cliente.cif.clone(),
        telefono: cliente.telefono.clone(),
        correo: cliente.correo.clone(),
        direccion: cliente.direccion.clone(),
        notas: cliente.notas.clone(),
        estado: cliente.estado.map(|e| e.as_str().to_string()),
        tipo_carga: cliente.tipo_carga.clone(),
        transporte: cliente.transporte.map(|t| t.as_str().to_string()),
        poliza_aseguradora: poliza.and_then(|p| p.aseguradora.clone()),
        poliza_num_poliza: poliza.and_then(|p| p.num_poliza.clone()),
        poliza_fecha_inicio: poliza.map(|p| p.fecha_inicio),
        poliza_fecha_fin: poliza.map(|p| p.fecha_fin),
        poliza_prima: poliza.and_then(|p| p.prima),
        venc_rc: venc.rc,
        venc_mercancias: venc.mercancias,
        venc_acc: venc.acc,
        venc_flotas: venc.flotas,
        venc_pyme: venc.pyme,
        num_vehiculos,
        facturacion: cliente.facturacion.clone(),
        fecha_llamada: cliente.fecha_llamada,
        estado_conversacion: cliente.estado_conversacion.clone(),
        created_at: cliente.created_at,
        updated_at: cliente.updated_at,
    })
}

pub(crate) fn row_to_cliente(row: ClienteRow) -> Result<Cliente, DatabaseError> {
    let estado = row
        .estado
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<EstadoCliente>().map_err(|_| DatabaseError::serialization("estado", s)))
        .transpose()?;
    let transporte = row
        .transporte
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Transporte>().map_err(|_| DatabaseError::serialization("transporte", s)))
        .transpose()?;
    let num_vehiculos = row
        .num_vehiculos
        .map(|n| u32::try_from(n).map_err(|_| DatabaseError::serialization("num_vehiculos", n)))
        .transpose()?;

    let poliza = match (row.poliza_fecha_inicio, row.poliza_fecha_fin) {
        (Some(fecha_inicio), Some(fecha_fin)) => Some(Poliza {
            aseguradora: row.poliza_aseguradora,
            num_poliza: row.poliza_num_poliza,
            fecha_inicio,
            fecha_fin,
            prima: row.poliza_prima,
        }),
        _ => None,
    };

    let vencimientos = Vencimientos {
        rc: row.venc_rc,
        mercancias: row.venc_mercancias,
        acc: row.venc_acc,
        flotas: row.venc_flotas,
        pyme: row.venc_pyme,
    };

    Ok(Cliente {
        id: ClienteId::from_uuid(row.id),
        empresa: row.empresa,
        contacto: row.contacto,
        cif: row.cif,
        telefono: row.telefono,
        correo: row.correo,
        direccion: row.direccion,
        notas: row.notas,
        estado,
        tipo_carga: row.tipo_carga,
        transporte,
        poliza,
        vencimientos: (!vencimientos.is_empty()).then_some(vencimientos),
        num_vehiculos,
        facturacion: row.facturacion,
        fecha_llamada: row.fecha_llamada,
        estado_conversacion: row.estado_conversacion,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
