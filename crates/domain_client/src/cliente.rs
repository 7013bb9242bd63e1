//! Cliente aggregate
//!
//! A client is a company the brokerage insures or is courting. Besides
//! contact data it carries an optional main policy ([`Poliza`]) and a set of
//! independently optional renewal dates ([`Vencimientos`]). Every date the
//! record tracks is a potential expiration; see [`Cliente::tracked_dates`].

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::ClienteId;

use crate::error::ClientError;
use crate::validation;

/// Commercial status of a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoCliente {
    Contratado,
    ContactadoBuenaPinta,
    EnNegociacion,
    Descartado,
}

impl EstadoCliente {
    pub const ALL: [EstadoCliente; 4] = [
        EstadoCliente::Contratado,
        EstadoCliente::ContactadoBuenaPinta,
        EstadoCliente::EnNegociacion,
        EstadoCliente::Descartado,
    ];

    /// Wire and storage value
    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoCliente::Contratado => "contratado",
            EstadoCliente::ContactadoBuenaPinta => "contactado_buena_pinta",
            EstadoCliente::EnNegociacion => "en_negociacion",
            EstadoCliente::Descartado => "descartado",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            EstadoCliente::Contratado => "Contratado",
            EstadoCliente::ContactadoBuenaPinta => "Contactado - Buena pinta",
            EstadoCliente::EnNegociacion => "En negociación",
            EstadoCliente::Descartado => "Descartado",
        }
    }
}

impl fmt::Display for EstadoCliente {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EstadoCliente {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| ClientError::invalid_value("estado", s))
    }
}

/// Geographic scope of the client's transport operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transporte {
    Nacional,
    Internacional,
    Peninsular,
    EspanaFrancia,
    EspanaPortugal,
    EspanaFranciaPortugal,
}

impl Transporte {
    pub const ALL: [Transporte; 6] = [
        Transporte::Nacional,
        Transporte::Internacional,
        Transporte::Peninsular,
        Transporte::EspanaFrancia,
        Transporte::EspanaPortugal,
        Transporte::EspanaFranciaPortugal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Transporte::Nacional => "nacional",
            Transporte::Internacional => "internacional",
            Transporte::Peninsular => "peninsular",
            Transporte::EspanaFrancia => "espana_francia",
            Transporte::EspanaPortugal => "espana_portugal",
            Transporte::EspanaFranciaPortugal => "espana_francia_portugal",
        }
    }
}

impl fmt::Display for Transporte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transporte {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ClientError::invalid_value("transporte", s))
    }
}

/// Cargo types offered by the frontend; `tipoCarga` itself stays free text
pub const TIPOS_CARGA_CONOCIDOS: [&str; 7] = [
    "general_fraccionada",
    "frigorifica",
    "adr_peligrosas",
    "completa_ftl",
    "fraccionada_ltl",
    "a_granel",
    "vehiculos",
];

/// Main insurance policy of a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poliza {
    pub aseguradora: Option<String>,
    pub num_poliza: Option<String>,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub prima: Option<Decimal>,
}

impl Poliza {
    /// Creates a policy; the end date must fall strictly after the start
    pub fn new(fecha_inicio: NaiveDate, fecha_fin: NaiveDate) -> Result<Self, ClientError> {
        validation::validate_policy_period(fecha_inicio, fecha_fin)?;
        Ok(Self {
            aseguradora: None,
            num_poliza: None,
            fecha_inicio,
            fecha_fin,
            prima: None,
        })
    }

    pub fn with_aseguradora(mut self, aseguradora: impl Into<String>) -> Self {
        self.aseguradora = validation::normalize_text(Some(aseguradora.into()));
        self
    }

    pub fn with_num_poliza(mut self, num_poliza: impl Into<String>) -> Self {
        self.num_poliza = validation::normalize_text(Some(num_poliza.into()));
        self
    }

    pub fn with_prima(mut self, prima: Decimal) -> Self {
        self.prima = Some(prima);
        self
    }
}

/// Typed renewal dates; each one is tracked independently
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vencimientos {
    pub rc: Option<NaiveDate>,
    pub mercancias: Option<NaiveDate>,
    pub acc: Option<NaiveDate>,
    pub flotas: Option<NaiveDate>,
    pub pyme: Option<NaiveDate>,
}

impl Vencimientos {
    pub fn is_empty(&self) -> bool {
        self.dates().next().is_none()
    }

    /// Present dates in rc, mercancias, acc, flotas, pyme order
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        [self.rc, self.mercancias, self.acc, self.flotas, self.pyme]
            .into_iter()
            .flatten()
    }
}

/// A brokerage client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    pub id: ClienteId,
    pub empresa: String,
    pub contacto: String,
    pub cif: Option<String>,
    pub telefono: Option<String>,
    pub correo: Option<String>,
    pub direccion: Option<String>,
    pub notas: Option<String>,
    pub estado: Option<EstadoCliente>,
    pub tipo_carga: Option<String>,
    pub transporte: Option<Transporte>,
    pub poliza: Option<Poliza>,
    pub vencimientos: Option<Vencimientos>,
    pub num_vehiculos: Option<u32>,
    pub facturacion: Option<String>,
    pub fecha_llamada: Option<NaiveDate>,
    pub estado_conversacion: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for a client that has not been stored yet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCliente {
    pub empresa: String,
    pub contacto: String,
    pub cif: Option<String>,
    pub telefono: Option<String>,
    pub correo: Option<String>,
    pub direccion: Option<String>,
    pub notas: Option<String>,
    pub estado: Option<EstadoCliente>,
    pub tipo_carga: Option<String>,
    pub transporte: Option<Transporte>,
    pub poliza: Option<Poliza>,
    pub vencimientos: Option<Vencimientos>,
    pub num_vehiculos: Option<u32>,
    pub facturacion: Option<String>,
    pub fecha_llamada: Option<NaiveDate>,
    pub estado_conversacion: Option<String>,
}

/// A partial update
///
/// The outer `Option` is "field present in the request"; for optional fields
/// the inner `None` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClienteChanges {
    pub empresa: Option<String>,
    pub contacto: Option<String>,
    pub cif: Option<Option<String>>,
    pub telefono: Option<Option<String>>,
    pub correo: Option<Option<String>>,
    pub direccion: Option<Option<String>>,
    pub notas: Option<Option<String>>,
    pub estado: Option<Option<EstadoCliente>>,
    pub tipo_carga: Option<Option<String>>,
    pub transporte: Option<Option<Transporte>>,
    pub poliza: Option<Option<Poliza>>,
    pub vencimientos: Option<Option<Vencimientos>>,
    pub num_vehiculos: Option<Option<u32>>,
    pub facturacion: Option<Option<String>>,
    pub fecha_llamada: Option<Option<NaiveDate>>,
    pub estado_conversacion: Option<Option<String>>,
}

impl ClienteChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Cliente {
    /// Validates and normalises a new client, assigning id and timestamps
    pub fn create(new: NewCliente) -> Result<Self, ClientError> {
        let empresa = validation::require_text(new.empresa)?;
        let contacto = validation::require_text(new.contacto)?;
        if let Some(ref poliza) = new.poliza {
            validation::validate_policy_period(poliza.fecha_inicio, poliza.fecha_fin)?;
        }

        let now = Utc::now();
        Ok(Self {
            id: ClienteId::new(),
            empresa,
            contacto,
            cif: validation::normalize_text(new.cif),
            telefono: validation::normalize_text(new.telefono),
            correo: validation::normalize_text(new.correo),
            direccion: validation::normalize_text(new.direccion),
            notas: validation::normalize_text(new.notas),
            estado: new.estado,
            tipo_carga: validation::normalize_text(new.tipo_carga),
            transporte: new.transporte,
            poliza: new.poliza,
            vencimientos: validation::normalize_vencimientos(new.vencimientos),
            num_vehiculos: new.num_vehiculos,
            facturacion: validation::normalize_text(new.facturacion),
            fecha_llamada: new.fecha_llamada,
            estado_conversacion: validation::normalize_text(new.estado_conversacion),
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a partial update, validating before anything is changed
    pub fn apply(&mut self, changes: ClienteChanges) -> Result<(), ClientError> {
        let empresa = changes.empresa.map(validation::require_text).transpose()?;
        let contacto = changes.contacto.map(validation::require_text).transpose()?;
        if let Some(Some(ref poliza)) = changes.poliza {
            validation::validate_policy_period(poliza.fecha_inicio, poliza.fecha_fin)?;
        }

        if let Some(empresa) = empresa {
            self.empresa = empresa;
        }
        if let Some(contacto) = contacto {
            self.contacto = contacto;
        }

        set_text(&mut self.cif, changes.cif);
        set_text(&mut self.telefono, changes.telefono);
        set_text(&mut self.correo, changes.correo);
        set_text(&mut self.direccion, changes.direccion);
        set_text(&mut self.notas, changes.notas);
        set_text(&mut self.tipo_carga, changes.tipo_carga);
        set_text(&mut self.facturacion, changes.facturacion);
        set_text(&mut self.estado_conversacion, changes.estado_conversacion);

        if let Some(estado) = changes.estado {
            self.estado = estado;
        }
        if let Some(transporte) = changes.transporte {
            self.transporte = transporte;
        }
        if let Some(poliza) = changes.poliza {
            self.poliza = poliza;
        }
        if let Some(vencimientos) = changes.vencimientos {
            self.vencimientos = validation::normalize_vencimientos(vencimientos);
        }
        if let Some(num_vehiculos) = changes.num_vehiculos {
            self.num_vehiculos = num_vehiculos;
        }
        if let Some(fecha_llamada) = changes.fecha_llamada {
            self.fecha_llamada = fecha_llamada;
        }

        self.updated_at = Utc::now();
        Ok(())
    }

    /// Every tracked expiration date: policy end first, then typed renewals
    pub fn tracked_dates(&self) -> Vec<NaiveDate> {
        self.poliza
            .iter()
            .map(|p| p.fecha_fin)
            .chain(self.vencimientos.iter().flat_map(|v| v.dates()))
            .collect()
    }

    pub fn is_contratado(&self) -> bool {
        self.estado == Some(EstadoCliente::Contratado)
    }
}

fn set_text(slot: &mut Option<String>, change: Option<Option<String>>) {
    if let Some(value) = change {
        *slot = validation::normalize_text(value);
    }
}
