//! Dashboard response

use serde::Serialize;

use domain_expiration::DashboardSummary;
use domain_settings::Settings;

use super::vencimientos::{MonthBucketView, ProximoVencimiento};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub total_clientes: usize,
    pub vencen_este_mes: usize,
    pub vencen_en_ventana: usize,
    pub contratados: usize,
    /// Percentage of clients under contract, one decimal
    pub tasa_cierre: f64,
    pub alert_window_days: u32,
    pub por_mes: Vec<MonthBucketView>,
    pub proximos: Vec<ProximoVencimiento>,
}

impl DashboardResponse {
    pub fn new(summary: DashboardSummary, settings: &Settings) -> Self {
        Self {
            total_clientes: summary.total_clientes,
            vencen_este_mes: summary.vencen_este_mes,
            vencen_en_ventana: summary.vencen_en_ventana,
            contratados: summary.contratados,
            tasa_cierre: summary.tasa_cierre,
            alert_window_days: summary.alert_window_days,
            por_mes: summary
                .por_mes
                .into_iter()
                .map(|b| MonthBucketView::new(b, settings))
                .collect(),
            proximos: summary
                .proximos
                .into_iter()
                .map(|p| ProximoVencimiento::new(p, settings))
                .collect(),
        }
    }
}
