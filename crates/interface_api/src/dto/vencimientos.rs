//! Expiration views
//!
//! Domain results decorated with what the frontend draws: urgency badge,
//! status text and the month chip in the configured color.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::ClienteId;
use domain_client::Cliente;
use domain_expiration::{
    ExpirationKind, ExpirationStatus, MonthBucket, NearestExpiration, UpcomingExpiration, Urgency,
};
use domain_settings::{month_chip, HexColor, MonthChip, Settings, FALLBACK_COLOR};

/// Query of `GET /api/vencimientos`
#[derive(Debug, Default, Deserialize)]
pub struct VencimientosParams {
    pub days: Option<String>,
    pub mes: Option<String>,
    pub estado: Option<String>,
}

/// One expiration date as rendered in lists and on the dashboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpirationView {
    /// Short label, e.g. `RC`
    pub tipo: String,
    pub kind: ExpirationKind,
    pub fecha: NaiveDate,
    pub dias: i64,
    pub urgencia: Urgency,
    pub urgencia_label: String,
    pub vencido: bool,
    /// `Vencido hace N días`, `Vence hoy` or `Faltan N días`
    pub texto: String,
    pub chip: MonthChip,
}

impl ExpirationView {
    pub fn new(kind: ExpirationKind, fecha: NaiveDate, dias: i64, settings: &Settings) -> Self {
        let urgency = Urgency::from_days(dias);
        let status = ExpirationStatus::from_days(dias);
        Self {
            tipo: kind.short_label().to_string(),
            kind,
            fecha,
            dias,
            urgencia: urgency,
            urgencia_label: urgency.label().to_string(),
            vencido: status.is_overdue(),
            texto: status.text(),
            chip: month_chip(settings, fecha),
        }
    }

    pub fn from_nearest(nearest: &NearestExpiration, settings: &Settings) -> Self {
        Self::new(nearest.kind, nearest.date, nearest.days, settings)
    }
}

/// A client in the vencimientos list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VencimientoCliente {
    #[serde(flatten)]
    pub cliente: Cliente,
    pub proximo_vencimiento: Option<ExpirationView>,
}

/// An entry of the dashboard's "próximos vencimientos"
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProximoVencimiento {
    pub cliente_id: ClienteId,
    pub empresa: String,
    #[serde(flatten)]
    pub vencimiento: ExpirationView,
}

impl ProximoVencimiento {
    pub fn new(upcoming: UpcomingExpiration, settings: &Settings) -> Self {
        Self {
            vencimiento: ExpirationView::new(upcoming.kind, upcoming.date, upcoming.days, settings),
            cliente_id: upcoming.cliente_id,
            empresa: upcoming.empresa,
        }
    }
}

/// A month bucket with its configured color
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthBucketView {
    #[serde(flatten)]
    pub bucket: MonthBucket,
    pub color: String,
}

impl MonthBucketView {
    pub fn new(bucket: MonthBucket, settings: &Settings) -> Self {
        let color = settings
            .month_colors
            .get(bucket.numero)
            .map(HexColor::to_string)
            .unwrap_or_else(|| FALLBACK_COLOR.to_string());
        Self { bucket, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_expiration::month_buckets;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_view_of_overdue_expiration() {
        let view = ExpirationView::new(ExpirationKind::Rc, date(2025, 3, 10), -5, &Settings::default());
        assert!(view.vencido);
        assert_eq!(view.texto, "Vencido hace 5 días");
        assert_eq!(view.urgencia, Urgency::High);
        assert_eq!(view.tipo, "RC");
        assert_eq!(view.chip.label, "Mar");
    }

    #[test]
    fn test_view_serialized_names() {
        let view = ExpirationView::new(ExpirationKind::Poliza, date(2025, 4, 20), 20, &Settings::default());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["urgenciaLabel"], "Media");
        assert_eq!(json["texto"], "Faltan 20 días");
        assert_eq!(json["fecha"], "2025-04-20");
        assert_eq!(json["chip"]["color"], "#84cc16");
    }

    #[test]
    fn test_bucket_view_carries_month_color() {
        let buckets = month_buckets(&[], date(2025, 11, 3));
        let view = MonthBucketView::new(buckets[0].clone(), &Settings::default());
        assert_eq!(view.color, "#8b5cf6");
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["mes"], "Noviembre 2025");
        assert_eq!(json["color"], "#8b5cf6");
    }

    proptest::proptest! {
        #[test]
        fn prop_view_is_consistent_with_day_count(dias in -400i64..400) {
            let fecha = date(2025, 6, 15);
            let view = ExpirationView::new(ExpirationKind::Acc, fecha, dias, &Settings::default());
            proptest::prop_assert_eq!(view.vencido, dias < 0);
            proptest::prop_assert_eq!(view.urgencia, Urgency::from_days(dias));
            proptest::prop_assert!(view.texto.contains(&dias.abs().to_string()) || dias == 0);
            proptest::prop_assert_eq!(view.chip.mes, 6);
        }
    }
}
