//! Monthly expiration buckets for the dashboard chart
//!
//! Twelve consecutive months starting with today's month. Every expiration
//! instance lands in the bucket of its month; a client with three dates in
//! the same month contributes three entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{ClienteId, YearMonth};
use domain_client::Cliente;

use crate::expiration::{expirations_of, ExpirationKind};

pub const MESES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

const WINDOW_MONTHS: usize = 12;

/// One expiration instance inside a bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketEntry {
    pub cliente_id: ClienteId,
    pub empresa: String,
    pub tipo: String,
    pub kind: ExpirationKind,
    pub fecha: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthBucket {
    /// Month number, 1-12
    pub numero: u32,
    pub year: i32,
    /// e.g. "Marzo 2026"
    pub mes: String,
    pub es_actual: bool,
    pub vencimientos: usize,
    pub detalles: Vec<BucketEntry>,
}

impl MonthBucket {
    fn empty(month: YearMonth, is_current: bool) -> Self {
        Self {
            numero: month.month(),
            year: month.year(),
            mes: month_label(month),
            es_actual: is_current,
            vencimientos: 0,
            detalles: Vec::new(),
        }
    }
}

/// Spanish "<Mes> <año>" label
pub fn month_label(month: YearMonth) -> String {
    let idx = month.month().saturating_sub(1) as usize;
    format!("{} {}", MESES[idx % 12], month.year())
}

/// Groups every expiration of `clientes` into the 12-month window starting at `today`
pub fn month_buckets(clientes: &[Cliente], today: NaiveDate) -> Vec<MonthBucket> {
    let months = YearMonth::of(today).window(WINDOW_MONTHS);
    let mut buckets: Vec<MonthBucket> = months
        .iter()
        .enumerate()
        .map(|(i, m)| MonthBucket::empty(*m, i == 0))
        .collect();

    for cliente in clientes {
        for exp in expirations_of(cliente) {
            let month = YearMonth::of(exp.date);
            if let Some(pos) = months.iter().position(|m| *m == month) {
                let bucket = &mut buckets[pos];
                bucket.detalles.push(BucketEntry {
                    cliente_id: cliente.id,
                    empresa: cliente.empresa.clone(),
                    tipo: exp.kind.long_label().to_string(),
                    kind: exp.kind,
                    fecha: exp.date,
                });
                bucket.vencimientos += 1;
            }
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_client::{NewCliente, Poliza, Vencimientos};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_wraps_year() {
        let buckets = month_buckets(&[], date(2025, 11, 20));
        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets[0].mes, "Noviembre 2025");
        assert!(buckets[0].es_actual);
        assert_eq!(buckets[2].mes, "Enero 2026");
        assert_eq!(buckets[2].numero, 1);
        assert!(!buckets[2].es_actual);
        assert_eq!(buckets[11].mes, "Octubre 2026");
    }

    #[test]
    fn test_instances_are_not_deduplicated() {
        let c = Cliente::create(NewCliente {
            empresa: "Frigoríficos Sur".to_string(),
            contacto: "Pedro".to_string(),
            poliza: Some(Poliza::new(date(2024, 12, 1), date(2025, 12, 1)).unwrap()),
            vencimientos: Some(Vencimientos {
                rc: Some(date(2025, 12, 15)),
                acc: Some(date(2025, 12, 31)),
                ..Default::default()
            }),
            ..Default::default()
        })
        .unwrap();

        let buckets = month_buckets(&[c], date(2025, 11, 2));
        assert_eq!(buckets[1].vencimientos, 3);
        let tipos: Vec<&str> = buckets[1].detalles.iter().map(|d| d.tipo.as_str()).collect();
        assert_eq!(tipos, vec!["Póliza", "Responsabilidad Civil", "Accidentes"]);
    }

    #[test]
    fn test_out_of_window_dates_are_skipped() {
        let c = Cliente::create(NewCliente {
            empresa: "A".to_string(),
            contacto: "B".to_string(),
            vencimientos: Some(Vencimientos {
                rc: Some(date(2025, 10, 31)),
                pyme: Some(date(2026, 11, 1)),
                ..Default::default()
            }),
            ..Default::default()
        })
        .unwrap();
        let total: usize = month_buckets(&[c], date(2025, 11, 2))
            .iter()
            .map(|b| b.vencimientos)
            .sum();
        assert_eq!(total, 0);
    }
}
