//! Client DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use validator::Validate;

use core_kernel::{BusinessCalendar, ClienteId};
use domain_client::{
    ClientError, ClienteChanges, EstadoCliente, FilterParams, NewCliente, Poliza, Transporte,
    Vencimientos,
};

use super::{double_option, non_blank};

/// Builds filter params from raw query pairs
///
/// Multi-valued filters may repeat their key (`estados=a&estados=b`), use
/// the bracket form (`estados[]=a`) or carry a comma list.
pub fn filter_params(pairs: Vec<(String, String)>) -> FilterParams {
    let mut params = FilterParams::default();
    for (key, value) in pairs {
        match key.trim_end_matches("[]") {
            "search" => params.search = Some(value),
            "estados" => params.estados.push(value),
            "tiposCarga" => params.tipos_carga.push(value),
            "transportes" => params.transportes.push(value),
            "mesVencimiento" => params.mes_vencimiento = Some(value),
            "proximosDias" => params.proximos_dias = Some(value),
            _ => {}
        }
    }
    params
}

pub fn parse_cliente_id(raw: &str) -> Result<ClienteId, ClientError> {
    raw.trim()
        .parse()
        .map_err(|_| ClientError::InvalidId(raw.to_string()))
}

fn parse_date(
    calendar: &BusinessCalendar,
    field: &str,
    value: Option<String>,
) -> Result<Option<chrono::NaiveDate>, ClientError> {
    non_blank(value)
        .map(|raw| {
            calendar
                .parse_date(&raw)
                .map_err(|_| ClientError::invalid_date(field, raw))
        })
        .transpose()
}

fn parse_estado(value: Option<String>) -> Result<Option<EstadoCliente>, ClientError> {
    non_blank(value).map(|v| v.parse()).transpose()
}

fn parse_transporte(value: Option<String>) -> Result<Option<Transporte>, ClientError> {
    non_blank(value).map(|v| v.parse()).transpose()
}

/// Largest count the `INTEGER` columns hold
const MAX_COUNT: u32 = i32::MAX as u32;

/// Accepts a JSON number or numeric string up to [`MAX_COUNT`]; blanks mean "no value"
fn parse_count(field: &str, value: Option<Value>) -> Result<Option<u32>, ClientError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .filter(|v| *v <= MAX_COUNT)
            .map(Some)
            .ok_or_else(|| ClientError::invalid_value(field, n.to_string())),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|v| *v <= MAX_COUNT)
            .map(Some)
            .ok_or_else(|| ClientError::invalid_value(field, s)),
        Some(other) => Err(ClientError::invalid_value(field, other.to_string())),
    }
}

/// Non-negative decimal from a JSON number or numeric string
fn parse_amount(field: &str, value: Option<Value>) -> Result<Option<Decimal>, ClientError> {
    let raw = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => return Err(ClientError::invalid_value(field, other.to_string())),
    };
    let amount = Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map_err(|_| ClientError::invalid_value(field, raw.clone()))?;
    if amount.is_sign_negative() {
        return Err(ClientError::invalid_value(field, raw));
    }
    Ok(Some(amount))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolizaPayload {
    pub aseguradora: Option<String>,
    pub num_poliza: Option<String>,
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
    pub prima: Option<Value>,
}

impl PolizaPayload {
    /// `None` when the form left every policy field blank
    pub fn into_poliza(self, calendar: &BusinessCalendar) -> Result<Option<Poliza>, ClientError> {
        let aseguradora = non_blank(self.aseguradora);
        let num_poliza = non_blank(self.num_poliza);
        let prima = parse_amount("poliza.prima", self.prima)?;
        let inicio = parse_date(calendar, "poliza.fechaInicio", self.fecha_inicio)?;
        let fin = parse_date(calendar, "poliza.fechaFin", self.fecha_fin)?;

        match (inicio, fin) {
            (Some(inicio), Some(fin)) => {
                let mut poliza = Poliza::new(inicio, fin)?;
                poliza.aseguradora = aseguradora;
                poliza.num_poliza = num_poliza;
                poliza.prima = prima;
                Ok(Some(poliza))
            }
            (None, None) if aseguradora.is_none() && num_poliza.is_none() && prima.is_none() => {
                Ok(None)
            }
            _ => Err(ClientError::IncompletePolicy),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct VencimientosPayload {
    pub rc: Option<String>,
    pub mercancias: Option<String>,
    pub acc: Option<String>,
    pub flotas: Option<String>,
    pub pyme: Option<String>,
}

impl VencimientosPayload {
    pub fn into_vencimientos(self, calendar: &BusinessCalendar) -> Result<Vencimientos, ClientError> {
        Ok(Vencimientos {
            rc: parse_date(calendar, "vencimientos.rc", self.rc)?,
            mercancias: parse_date(calendar, "vencimientos.mercancias", self.mercancias)?,
            acc: parse_date(calendar, "vencimientos.acc", self.acc)?,
            flotas: parse_date(calendar, "vencimientos.flotas", self.flotas)?,
            pyme: parse_date(calendar, "vencimientos.pyme", self.pyme)?,
        })
    }
}

/// Body of `POST /api/clientes`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClienteRequest {
    pub empresa: Option<String>,
    pub contacto: Option<String>,
    pub cif: Option<String>,
    pub telefono: Option<String>,
    pub correo: Option<String>,
    pub direccion: Option<String>,
    pub notas: Option<String>,
    pub estado: Option<String>,
    pub tipo_carga: Option<String>,
    pub transporte: Option<String>,
    pub poliza: Option<PolizaPayload>,
    pub vencimientos: Option<VencimientosPayload>,
    pub num_vehiculos: Option<Value>,
    pub facturacion: Option<String>,
    pub fecha_llamada: Option<String>,
    pub estado_conversacion: Option<String>,
}

impl CreateClienteRequest {
    pub fn into_new_cliente(self, calendar: &BusinessCalendar) -> Result<NewCliente, ClientError> {
        let poliza = match self.poliza {
            Some(p) => p.into_poliza(calendar)?,
            None => None,
        };
        let vencimientos = self
            .vencimientos
            .map(|v| v.into_vencimientos(calendar))
            .transpose()?;

        Ok(NewCliente {
            empresa: self.empresa.unwrap_or_default(),
            contacto: self.contacto.unwrap_or_default(),
            cif: self.cif,
            telefono: self.telefono,
            correo: self.correo,
            direccion: self.direccion,
            notas: self.notas,
            estado: parse_estado(self.estado)?,
            tipo_carga: self.tipo_carga,
            transporte: parse_transporte(self.transporte)?,
            poliza,
            vencimientos,
            num_vehiculos: parse_count("numVehiculos", self.num_vehiculos)?,
            facturacion: self.facturacion,
            fecha_llamada: parse_date(calendar, "fechaLlamada", self.fecha_llamada)?,
            estado_conversacion: self.estado_conversacion,
        })
    }
}

/// Body of `PUT /api/clientes/:id`
///
/// Absent fields stay untouched; `null` (or a blank string) clears an
/// optional field. `poliza` and `vencimientos` are replaced as a whole.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClienteRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub empresa: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub contacto: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub cif: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub telefono: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub correo: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub direccion: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notas: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub estado: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub tipo_carga: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub transporte: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub poliza: Option<Option<PolizaPayload>>,
    #[serde(default, deserialize_with = "double_option")]
    pub vencimientos: Option<Option<VencimientosPayload>>,
    #[serde(default, deserialize_with = "double_option")]
    pub num_vehiculos: Option<Option<Value>>,
    #[serde(default, deserialize_with = "double_option")]
    pub facturacion: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub fecha_llamada: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub estado_conversacion: Option<Option<String>>,
}

impl UpdateClienteRequest {
    pub fn into_changes(self, calendar: &BusinessCalendar) -> Result<ClienteChanges, ClientError> {
        let required = |value: Option<Option<String>>| match value {
            Some(None) => Err(ClientError::MissingRequired),
            Some(Some(v)) => Ok(Some(v)),
            None => Ok(None),
        };
        let text = |value: Option<Option<String>>| value.map(non_blank);

        let poliza = match self.poliza {
            None => None,
            Some(None) => Some(None),
            Some(Some(p)) => Some(p.into_poliza(calendar)?),
        };
        let vencimientos = match self.vencimientos {
            None => None,
            Some(None) => Some(None),
            Some(Some(v)) => Some(Some(v.into_vencimientos(calendar)?)),
        };

        Ok(ClienteChanges {
            empresa: required(self.empresa)?,
            contacto: required(self.contacto)?,
            cif: text(self.cif),
            telefono: text(self.telefono),
            correo: text(self.correo),
            direccion: text(self.direccion),
            notas: text(self.notas),
            estado: self.estado.map(parse_estado).transpose()?,
            tipo_carga: text(self.tipo_carga),
            transporte: self.transporte.map(parse_transporte).transpose()?,
            poliza,
            vencimientos,
            num_vehiculos: self
                .num_vehiculos
                .map(|v| parse_count("numVehiculos", v))
                .transpose()?,
            facturacion: text(self.facturacion),
            fecha_llamada: self
                .fecha_llamada
                .map(|v| parse_date(calendar, "fechaLlamada", v))
                .transpose()?,
            estado_conversacion: text(self.estado_conversacion),
        })
    }
}

/// Body of `POST /api/clientes/bulk-delete`
#[derive(Debug, Default, Deserialize, Validate)]
pub struct BulkDeleteRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Se requiere un array de IDs"))]
    pub ids: Vec<String>,
}

impl BulkDeleteRequest {
    pub fn parse_ids(&self) -> Result<Vec<ClienteId>, ClientError> {
        self.ids.iter().map(|raw| parse_cliente_id(raw)).collect()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteResponse {
    pub message: String,
    pub deleted_count: u64,
}

impl BulkDeleteResponse {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            message: "Clientes eliminados exitosamente".to_string(),
            deleted_count,
        }
    }
}
