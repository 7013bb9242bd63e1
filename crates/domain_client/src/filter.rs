//! Client list filtering
//!
//! Query parameters are parsed into a [`ClienteFilter`], which is then turned
//! into a [`Predicate`] tree for a given business date. The tree is the single
//! definition of filter semantics: [`Predicate::matches`] evaluates it in
//! memory and the PostgreSQL adapter compiles the same tree to SQL.
//!
//! # The `sin_definir` sentinel
//!
//! Multi-select filters (estado, tipo de carga, transporte) accept the literal
//! value `sin_definir`, meaning "the field is not set on the record":
//!
//! | selection                    | predicate                       |
//! |------------------------------|---------------------------------|
//! | real values + `sin_definir`  | `Any[OneOf(values), Unset]`     |
//! | only `sin_definir`           | `Unset`                         |
//! | only real values             | `OneOf(values)`                 |
//! | nothing                      | no constraint                   |
//!
//! All constraints present in a filter are conjoined.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use core_kernel::{DateRange, YearMonth};

use crate::cliente::{Cliente, EstadoCliente, Transporte};
use crate::error::ClientError;

/// Filter value matching records where the field is not set
pub const SIN_DEFINIR: &str = "sin_definir";

/// Raw filter parameters as received from a request
///
/// Multi-valued entries may each hold a comma-separated list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    pub search: Option<String>,
    pub estados: Vec<String>,
    pub tipos_carga: Vec<String>,
    pub transportes: Vec<String>,
    pub mes_vencimiento: Option<String>,
    pub proximos_dias: Option<String>,
}

/// Enum-like client fields usable in multi-select filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectField {
    Estado,
    TipoCarga,
    Transporte,
}

impl SelectField {
    /// Storage column name
    pub fn column(&self) -> &'static str {
        match self {
            SelectField::Estado => "estado",
            SelectField::TipoCarga => "tipo_carga",
            SelectField::Transporte => "transporte",
        }
    }

    /// The record's value for this field, in wire form
    pub fn value_of<'a>(&self, cliente: &'a Cliente) -> Option<&'a str> {
        match self {
            SelectField::Estado => cliente.estado.as_ref().map(EstadoCliente::as_str),
            SelectField::TipoCarga => cliente.tipo_carga.as_deref(),
            SelectField::Transporte => cliente.transporte.as_ref().map(Transporte::as_str),
        }
    }
}

/// Date columns usable in range filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateField {
    PolizaFechaFin,
}

impl DateField {
    pub fn column(&self) -> &'static str {
        match self {
            DateField::PolizaFechaFin => "poliza_fecha_fin",
        }
    }

    pub fn value_of(&self, cliente: &Cliente) -> Option<NaiveDate> {
        match self {
            DateField::PolizaFechaFin => cliente.poliza.as_ref().map(|p| p.fecha_fin),
        }
    }
}

/// A multi-select filter: validated wire values plus the sentinel flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub values: Vec<String>,
    pub include_unset: bool,
}

impl Selection {
    /// Splits comma lists, drops blanks, and validates each real value
    pub fn parse<F>(raw: &[String], validate: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Result<(), ClientError>,
    {
        let mut selection = Selection::default();
        for value in raw.iter().flat_map(|entry| entry.split(',')).map(str::trim) {
            if value.is_empty() {
                continue;
            }
            if value == SIN_DEFINIR {
                selection.include_unset = true;
                continue;
            }
            validate(value)?;
            if !selection.values.iter().any(|v| v == value) {
                selection.values.push(value.to_string());
            }
        }
        Ok(selection)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && !self.include_unset
    }

    pub fn to_predicate(&self, field: SelectField) -> Option<Predicate> {
        let one_of = Predicate::OneOf {
            field,
            values: self.values.clone(),
        };
        match (self.values.is_empty(), self.include_unset) {
            (true, false) => None,
            (true, true) => Some(Predicate::Unset(field)),
            (false, false) => Some(one_of),
            (false, true) => Some(Predicate::Any(vec![one_of, Predicate::Unset(field)])),
        }
    }
}

/// Parsed client list filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClienteFilter {
    pub search: Option<String>,
    pub estados: Selection,
    pub tipos_carga: Selection,
    pub transportes: Selection,
    /// Month (1-12) in which the policy ends, in the current year
    pub mes_vencimiento: Option<u32>,
    /// Some tracked date falls within this many days from today
    pub proximos_dias: Option<u32>,
}

impl ClienteFilter {
    pub fn from_params(params: FilterParams) -> Result<Self, ClientError> {
        let search = params
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let estados = Selection::parse(&params.estados, |v| v.parse::<EstadoCliente>().map(|_| ()))?;
        let transportes = Selection::parse(&params.transportes, |v| v.parse::<Transporte>().map(|_| ()))?;
        let tipos_carga = Selection::parse(&params.tipos_carga, |_| Ok(()))?;

        let mes_vencimiento = match non_blank(params.mes_vencimiento) {
            Some(raw) => Some(parse_month(&raw)?),
            None => None,
        };
        let proximos_dias = match non_blank(params.proximos_dias) {
            Some(raw) => Some(
                raw.parse::<u32>()
                    .map_err(|_| ClientError::invalid_value("proximosDias", raw.clone()))?,
            ),
            None => None,
        };

        Ok(Self {
            search,
            estados,
            tipos_carga,
            transportes,
            mes_vencimiento,
            proximos_dias,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Builds the predicate for the business date `today`
    pub fn to_predicate(&self, today: NaiveDate) -> Result<Predicate, ClientError> {
        let mut parts = Vec::new();

        if let Some(ref search) = self.search {
            parts.push(Predicate::TextSearch(search.clone()));
        }
        parts.extend(self.estados.to_predicate(SelectField::Estado));
        parts.extend(self.tipos_carga.to_predicate(SelectField::TipoCarga));
        parts.extend(self.transportes.to_predicate(SelectField::Transporte));

        if let Some(mes) = self.mes_vencimiento {
            let month = YearMonth::new(today.year(), mes)
                .map_err(|_| ClientError::InvalidMonth(mes.to_string()))?;
            parts.push(Predicate::DateInRange {
                field: DateField::PolizaFechaFin,
                range: month.range(),
            });
        }
        if let Some(days) = self.proximos_dias {
            parts.push(Predicate::AnyExpirationInRange(DateRange::next_days(today, days)));
        }

        Ok(Predicate::All(parts))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_month(raw: &str) -> Result<u32, ClientError> {
    raw.parse::<u32>()
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| ClientError::InvalidMonth(raw.to_string()))
}

/// Boolean filter expression over clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Predicate {
    /// Conjunction; empty matches everything
    All(Vec<Predicate>),
    /// Disjunction; empty matches nothing
    Any(Vec<Predicate>),
    /// Case-insensitive literal substring over empresa, contacto, telefono, correo
    TextSearch(String),
    OneOf { field: SelectField, values: Vec<String> },
    Unset(SelectField),
    DateInRange { field: DateField, range: DateRange },
    /// Policy end or any typed renewal falls inside the range
    AnyExpirationInRange(DateRange),
}

impl Predicate {
    /// Matches every client
    pub fn everything() -> Self {
        Predicate::All(Vec::new())
    }

    pub fn matches(&self, cliente: &Cliente) -> bool {
        match self {
            Predicate::All(parts) => parts.iter().all(|p| p.matches(cliente)),
            Predicate::Any(parts) => parts.iter().any(|p| p.matches(cliente)),
            Predicate::TextSearch(needle) => {
                let needle = needle.to_lowercase();
                [
                    Some(cliente.empresa.as_str()),
                    Some(cliente.contacto.as_str()),
                    cliente.telefono.as_deref(),
                    cliente.correo.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|haystack| haystack.to_lowercase().contains(&needle))
            }
            Predicate::OneOf { field, values } => field
                .value_of(cliente)
                .is_some_and(|v| values.iter().any(|candidate| candidate == v)),
            Predicate::Unset(field) => field.value_of(cliente).is_none(),
            Predicate::DateInRange { field, range } => {
                field.value_of(cliente).is_some_and(|d| range.contains(d))
            }
            Predicate::AnyExpirationInRange(range) => {
                cliente.tracked_dates().into_iter().any(|d| range.contains(d))
            }
        }
    }
}
