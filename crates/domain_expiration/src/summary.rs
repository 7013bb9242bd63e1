//! Dashboard and vencimientos summaries

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use core_kernel::DateRange;
use domain_client::{Cliente, EstadoCliente};

use crate::buckets::{month_buckets, MonthBucket};
use crate::expiration::{nearest_expiration, upcoming_expirations, UpcomingExpiration};

/// Number of entries in the dashboard's upcoming list
pub const PROXIMOS_LIMIT: usize = 10;

/// Counts behind `GET /api/vencimientos/resumen`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VencimientosResumen {
    /// Policies ending within the next 30 days
    pub vencimientos_30_dias: usize,
    /// Policies ending within the next 60 days
    pub vencimientos_60_dias: usize,
    pub total_clientes: usize,
    pub clientes_contratados: usize,
    pub clientes_negociacion: usize,
}

pub fn resumen(clientes: &[Cliente], today: NaiveDate) -> VencimientosResumen {
    let policy_ends_within = |days: u32| {
        let range = DateRange::next_days(today, days);
        clientes
            .iter()
            .filter(|c| c.poliza.as_ref().is_some_and(|p| range.contains(p.fecha_fin)))
            .count()
    };
    let with_estado = |estado: EstadoCliente| {
        clientes.iter().filter(|c| c.estado == Some(estado)).count()
    };

    VencimientosResumen {
        vencimientos_30_dias: policy_ends_within(30),
        vencimientos_60_dias: policy_ends_within(60),
        total_clientes: clientes.len(),
        clientes_contratados: with_estado(EstadoCliente::Contratado),
        clientes_negociacion: with_estado(EstadoCliente::EnNegociacion),
    }
}

/// Everything the dashboard page shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_clientes: usize,
    /// Policies ending in the current calendar month (any year)
    pub vencen_este_mes: usize,
    /// Clients whose nearest expiration is within the alert window
    pub vencen_en_ventana: usize,
    pub contratados: usize,
    /// Share of contracted clients, percent with one decimal
    pub tasa_cierre: f64,
    pub alert_window_days: u32,
    pub por_mes: Vec<MonthBucket>,
    pub proximos: Vec<UpcomingExpiration>,
}

pub fn dashboard(clientes: &[Cliente], today: NaiveDate, alert_window_days: u32) -> DashboardSummary {
    let window = i64::from(alert_window_days);
    let current_month = today.month();

    let vencen_este_mes = clientes
        .iter()
        .filter(|c| c.poliza.as_ref().is_some_and(|p| p.fecha_fin.month() == current_month))
        .count();
    let vencen_en_ventana = clientes
        .iter()
        .filter_map(|c| nearest_expiration(c, today))
        .filter(|n| (0..=window).contains(&n.days))
        .count();
    let contratados = clientes.iter().filter(|c| c.is_contratado()).count();

    DashboardSummary {
        total_clientes: clientes.len(),
        vencen_este_mes,
        vencen_en_ventana,
        contratados,
        tasa_cierre: closing_rate(contratados, clientes.len()),
        alert_window_days,
        por_mes: month_buckets(clientes, today),
        proximos: upcoming_expirations(clientes, today, PROXIMOS_LIMIT),
    }
}

fn closing_rate(contratados: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = contratados as f64 * 100.0 / total as f64;
    (pct * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closing_rate_rounds_to_one_decimal() {
        assert_eq!(closing_rate(0, 0), 0.0);
        assert_eq!(closing_rate(2, 3), 66.7);
        assert_eq!(closing_rate(1, 8), 12.5);
        assert_eq!(closing_rate(3, 3), 100.0);
    }
}
