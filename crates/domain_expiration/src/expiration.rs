//! Expiration aggregation
//!
//! A client can track up to six dates: the policy end date and five typed
//! renewals. Each present date is one [`Expiration`]; absent dates are "not
//! tracked" and never count as expired.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{days_until, ClienteId};
use domain_client::Cliente;

use crate::urgency::{ExpirationStatus, Urgency};

/// Category of a tracked date, in aggregation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpirationKind {
    Poliza,
    Rc,
    Mercancias,
    Acc,
    Flotas,
    Pyme,
}

impl ExpirationKind {
    pub const ALL: [ExpirationKind; 6] = [
        ExpirationKind::Poliza,
        ExpirationKind::Rc,
        ExpirationKind::Mercancias,
        ExpirationKind::Acc,
        ExpirationKind::Flotas,
        ExpirationKind::Pyme,
    ];

    /// Label used in tables and the upcoming list
    pub fn short_label(&self) -> &'static str {
        match self {
            ExpirationKind::Poliza => "Póliza",
            ExpirationKind::Rc => "RC",
            ExpirationKind::Mercancias => "Mercancías",
            ExpirationKind::Acc => "ACC",
            ExpirationKind::Flotas => "Flotas",
            ExpirationKind::Pyme => "PYME",
        }
    }

    /// Label used in the monthly drill-down
    pub fn long_label(&self) -> &'static str {
        match self {
            ExpirationKind::Poliza => "Póliza",
            ExpirationKind::Rc => "Responsabilidad Civil",
            ExpirationKind::Mercancias => "Mercancías",
            ExpirationKind::Acc => "Accidentes",
            ExpirationKind::Flotas => "Flotas",
            ExpirationKind::Pyme => "Pyme",
        }
    }

    fn date_of(&self, cliente: &Cliente) -> Option<NaiveDate> {
        let v = cliente.vencimientos.as_ref();
        match self {
            ExpirationKind::Poliza => cliente.poliza.as_ref().map(|p| p.fecha_fin),
            ExpirationKind::Rc => v.and_then(|v| v.rc),
            ExpirationKind::Mercancias => v.and_then(|v| v.mercancias),
            ExpirationKind::Acc => v.and_then(|v| v.acc),
            ExpirationKind::Flotas => v.and_then(|v| v.flotas),
            ExpirationKind::Pyme => v.and_then(|v| v.pyme),
        }
    }
}

/// One tracked date of one client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expiration {
    pub kind: ExpirationKind,
    pub date: NaiveDate,
}

impl Expiration {
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        days_until(self.date, today)
    }
}

/// All tracked dates of a client, in [`ExpirationKind::ALL`] order
pub fn expirations_of(cliente: &Cliente) -> Vec<Expiration> {
    ExpirationKind::ALL
        .into_iter()
        .filter_map(|kind| kind.date_of(cliente).map(|date| Expiration { kind, date }))
        .collect()
}

/// The representative expiration of a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestExpiration {
    pub kind: ExpirationKind,
    pub date: NaiveDate,
    pub days: i64,
}

impl NearestExpiration {
    pub fn urgency(&self) -> Urgency {
        Urgency::from_days(self.days)
    }

    pub fn status(&self) -> ExpirationStatus {
        ExpirationStatus::from_days(self.days)
    }
}

/// Picks the nearest upcoming expiration (today counts as upcoming)
///
/// When every tracked date is past, the least-overdue one is returned.
/// Returns `None` only when the client tracks no dates at all. Equal day
/// counts resolve to the earlier kind.
pub fn nearest_expiration(cliente: &Cliente, today: NaiveDate) -> Option<NearestExpiration> {
    let mut upcoming: Option<NearestExpiration> = None;
    let mut overdue: Option<NearestExpiration> = None;

    for exp in expirations_of(cliente) {
        let candidate = NearestExpiration {
            kind: exp.kind,
            date: exp.date,
            days: exp.days_until(today),
        };
        if candidate.days >= 0 {
            if upcoming.map_or(true, |best| candidate.days < best.days) {
                upcoming = Some(candidate);
            }
        } else if overdue.map_or(true, |best| candidate.days > best.days) {
            overdue = Some(candidate);
        }
    }

    upcoming.or(overdue)
}

/// A single expiration instance in the dashboard's upcoming list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingExpiration {
    pub cliente_id: ClienteId,
    pub empresa: String,
    pub kind: ExpirationKind,
    pub date: NaiveDate,
    pub days: i64,
}

impl UpcomingExpiration {
    pub fn urgency(&self) -> Urgency {
        Urgency::from_days(self.days)
    }

    pub fn status(&self) -> ExpirationStatus {
        ExpirationStatus::from_days(self.days)
    }
}

/// Every expiration instance across `clientes`, soonest first, truncated to `limit`
///
/// Overdue instances are included and therefore sort to the front.
pub fn upcoming_expirations(
    clientes: &[Cliente],
    today: NaiveDate,
    limit: usize,
) -> Vec<UpcomingExpiration> {
    let mut all: Vec<UpcomingExpiration> = clientes
        .iter()
        .flat_map(|c| {
            expirations_of(c).into_iter().map(move |exp| UpcomingExpiration {
                cliente_id: c.id,
                empresa: c.empresa.clone(),
                kind: exp.kind,
                date: exp.date,
                days: exp.days_until(today),
            })
        })
        .collect();

    all.sort_by_key(|u| u.days);
    all.truncate(limit);
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_client::{NewCliente, Poliza, Vencimientos};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cliente(poliza_fin: Option<NaiveDate>, vencimientos: Option<Vencimientos>) -> Cliente {
        Cliente::create(NewCliente {
            empresa: "Acme".to_string(),
            contacto: "Ana".to_string(),
            poliza: poliza_fin.map(|fin| Poliza::new(date(2020, 1, 1), fin).unwrap()),
            vencimientos,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_policy_only_client() {
        let c = cliente(Some(date(2025, 6, 30)), None);
        let nearest = nearest_expiration(&c, date(2025, 6, 1)).unwrap();
        assert_eq!(nearest.date, date(2025, 6, 30));
        assert_eq!(nearest.kind, ExpirationKind::Poliza);
        assert_eq!(nearest.days, 29);
    }

    #[test]
    fn test_nearest_prefers_upcoming_over_overdue() {
        let c = cliente(
            Some(date(2025, 5, 1)),
            Some(Vencimientos {
                rc: Some(date(2025, 8, 1)),
                acc: Some(date(2025, 7, 1)),
                ..Default::default()
            }),
        );
        let nearest = nearest_expiration(&c, date(2025, 6, 1)).unwrap();
        assert_eq!(nearest.kind, ExpirationKind::Acc);
    }

    #[test]
    fn test_all_overdue_returns_least_overdue() {
        let c = cliente(
            Some(date(2025, 1, 1)),
            Some(Vencimientos {
                flotas: Some(date(2025, 5, 20)),
                ..Default::default()
            }),
        );
        let nearest = nearest_expiration(&c, date(2025, 6, 1)).unwrap();
        assert_eq!(nearest.kind, ExpirationKind::Flotas);
        assert_eq!(nearest.days, -12);
    }

    #[test]
    fn test_no_dates_is_none() {
        assert!(nearest_expiration(&cliente(None, None), date(2025, 6, 1)).is_none());
    }

    #[test]
    fn test_tie_goes_to_earlier_kind() {
        let c = cliente(
            Some(date(2025, 7, 1)),
            Some(Vencimientos {
                mercancias: Some(date(2025, 7, 1)),
                ..Default::default()
            }),
        );
        let nearest = nearest_expiration(&c, date(2025, 6, 1)).unwrap();
        assert_eq!(nearest.kind, ExpirationKind::Poliza);
    }

    #[test]
    fn test_upcoming_list_sorted_and_truncated() {
        let a = cliente(Some(date(2025, 9, 1)), None);
        let b = cliente(
            None,
            Some(Vencimientos {
                rc: Some(date(2025, 5, 1)),
                pyme: Some(date(2025, 6, 10)),
                ..Default::default()
            }),
        );
        let list = upcoming_expirations(&[a, b], date(2025, 6, 1), 2);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].kind, ExpirationKind::Rc);
        assert_eq!(list[0].days, -31);
        assert_eq!(list[1].kind, ExpirationKind::Pyme);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ExpirationKind::Acc.short_label(), "ACC");
        assert_eq!(ExpirationKind::Acc.long_label(), "Accidentes");
        assert_eq!(ExpirationKind::Pyme.short_label(), "PYME");
    }
}
