//! Clients with upcoming expirations
//!
//! Backs `GET /api/vencimientos`. A client is listed when at least one of its
//! tracked dates is today or later; optional query constraints narrow the
//! set further. Results are ordered by their nearest expiration.

use chrono::{Datelike, NaiveDate};

use core_kernel::days_until;
use domain_client::{Cliente, EstadoCliente};

use crate::error::ExpirationError;
use crate::expiration::nearest_expiration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VencimientosQuery {
    /// Some tracked date falls within `[today, today + days]`
    pub days: Option<u32>,
    /// Some tracked date falls in this month (1-12) of any year
    pub mes: Option<u32>,
    pub estado: Option<EstadoCliente>,
}

impl VencimientosQuery {
    pub fn from_params(
        days: Option<&str>,
        mes: Option<&str>,
        estado: Option<&str>,
    ) -> Result<Self, ExpirationError> {
        let days = non_blank(days)
            .map(|raw| {
                raw.parse::<u32>()
                    .map_err(|_| ExpirationError::InvalidDays(raw.to_string()))
            })
            .transpose()?;
        let mes = non_blank(mes)
            .map(|raw| {
                raw.parse::<u32>()
                    .ok()
                    .filter(|m| (1..=12).contains(m))
                    .ok_or_else(|| ExpirationError::InvalidMonth(raw.to_string()))
            })
            .transpose()?;
        let estado = non_blank(estado)
            .map(str::parse::<EstadoCliente>)
            .transpose()?;

        Ok(Self { days, mes, estado })
    }

    fn accepts(&self, cliente: &Cliente, today: NaiveDate) -> bool {
        let dates = cliente.tracked_dates();
        let day_counts: Vec<i64> = dates.iter().map(|d| days_until(*d, today)).collect();

        if !day_counts.iter().any(|d| *d >= 0) {
            return false;
        }
        if let Some(window) = self.days {
            let window = i64::from(window);
            if !day_counts.iter().any(|d| (0..=window).contains(d)) {
                return false;
            }
        }
        if let Some(mes) = self.mes {
            if !dates.iter().any(|d| d.month() == mes) {
                return false;
            }
        }
        if let Some(estado) = self.estado {
            if cliente.estado != Some(estado) {
                return false;
            }
        }
        true
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Filters `clientes` by `query` and orders them by nearest expiration
pub fn list_vencimientos(
    clientes: Vec<Cliente>,
    query: &VencimientosQuery,
    today: NaiveDate,
) -> Vec<Cliente> {
    let mut listed: Vec<(i64, Cliente)> = clientes
        .into_iter()
        .filter(|c| query.accepts(c, today))
        .map(|c| {
            let days = nearest_expiration(&c, today).map_or(i64::MAX, |n| n.days);
            (days, c)
        })
        .collect();

    listed.sort_by_key(|(days, _)| *days);
    listed.into_iter().map(|(_, c)| c).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_parsing() {
        let q = VencimientosQuery::from_params(Some("30"), Some(""), Some("contratado")).unwrap();
        assert_eq!(q.days, Some(30));
        assert_eq!(q.mes, None);
        assert_eq!(q.estado, Some(EstadoCliente::Contratado));

        assert!(matches!(
            VencimientosQuery::from_params(Some("-1"), None, None),
            Err(ExpirationError::InvalidDays(_))
        ));
        assert!(matches!(
            VencimientosQuery::from_params(None, Some("13"), None),
            Err(ExpirationError::InvalidMonth(_))
        ));
        assert!(matches!(
            VencimientosQuery::from_params(None, None, Some("vip")),
            Err(ExpirationError::Client(_))
        ));
    }
}
