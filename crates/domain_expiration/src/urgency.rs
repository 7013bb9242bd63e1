//! Urgency classification
//!
//! | days      | urgency |
//! |-----------|---------|
//! | < 15      | Alta    |
//! | 15 ..= 30 | Media   |
//! | > 30      | Baja    |
//!
//! Negative day counts are additionally reported as overdue by
//! [`ExpirationStatus`]; their urgency is still `High`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

impl Urgency {
    pub fn from_days(days: i64) -> Self {
        if days > 30 {
            Urgency::Low
        } else if days >= 15 {
            Urgency::Medium
        } else {
            Urgency::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Urgency::High => "Alta",
            Urgency::Medium => "Media",
            Urgency::Low => "Baja",
        }
    }
}

/// Rendering state of an expiration relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "estado", rename_all = "snake_case")]
pub enum ExpirationStatus {
    Overdue { days_overdue: i64 },
    Due { days: i64, urgency: Urgency },
}

impl ExpirationStatus {
    pub fn from_days(days: i64) -> Self {
        if days < 0 {
            ExpirationStatus::Overdue { days_overdue: -days }
        } else {
            ExpirationStatus::Due {
                days,
                urgency: Urgency::from_days(days),
            }
        }
    }

    pub fn is_overdue(&self) -> bool {
        matches!(self, ExpirationStatus::Overdue { .. })
    }

    /// Badge text shown next to an expiration date
    pub fn text(&self) -> String {
        match self {
            ExpirationStatus::Overdue { days_overdue } => format!("Vencido hace {} días", days_overdue),
            ExpirationStatus::Due { days: 0, .. } => "Vence hoy".to_string(),
            ExpirationStatus::Due { days, .. } => format!("Faltan {} días", days),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(Urgency::from_days(14), Urgency::High);
        assert_eq!(Urgency::from_days(15), Urgency::Medium);
        assert_eq!(Urgency::from_days(30), Urgency::Medium);
        assert_eq!(Urgency::from_days(31), Urgency::Low);
        assert_eq!(Urgency::from_days(-3), Urgency::High);
    }

    #[test]
    fn test_status_text() {
        assert_eq!(ExpirationStatus::from_days(-4).text(), "Vencido hace 4 días");
        assert_eq!(ExpirationStatus::from_days(0).text(), "Vence hoy");
        assert_eq!(ExpirationStatus::from_days(12).text(), "Faltan 12 días");
    }

    #[test]
    fn test_status_serializes_tagged() {
        let json = serde_json::to_value(ExpirationStatus::from_days(-2)).unwrap();
        assert_eq!(json["estado"], "overdue");
        assert_eq!(json["days_overdue"], 2);
    }
}
