//! The settings singleton and its patch rules

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::SettingsError;

pub const DEFAULT_ALERT_WINDOW_DAYS: u32 = 60;

const DEFAULT_MONTH_COLORS: [&str; 12] = [
    "#ef4444", "#f97316", "#fbbf24", "#84cc16", "#22c55e", "#10b981",
    "#14b8a6", "#06b6d4", "#3b82f6", "#6366f1", "#8b5cf6", "#a855f7",
];

/// A `#rrggbb` color
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(value: &str) -> Result<Self, SettingsError> {
        let valid = value.len() == 7
            && value.starts_with('#')
            && value[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(SettingsError::InvalidHex(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    /// For compile-time constants known to be well formed
    pub(crate) fn trusted(value: &str) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        (channel(1), channel(3), channel(5))
    }
}

impl TryFrom<String> for HexColor {
    type Error = SettingsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HexColor::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Month number (1-12) to color; serialises as `{"1": "#...", ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthColors(BTreeMap<u32, HexColor>);

impl MonthColors {
    pub fn get(&self, month: u32) -> Option<&HexColor> {
        self.0.get(&month)
    }

    pub fn set(&mut self, month: u32, color: HexColor) {
        self.0.insert(month, color);
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &HexColor)> {
        self.0.iter().map(|(m, c)| (*m, c))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for MonthColors {
    fn default() -> Self {
        Self(
            DEFAULT_MONTH_COLORS
                .iter()
                .zip(1u32..)
                .map(|(hex, month)| (month, HexColor::trusted(hex)))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub alert_window_days: u32,
    pub month_colors: MonthColors,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            alert_window_days: DEFAULT_ALERT_WINDOW_DAYS,
            month_colors: MonthColors::default(),
        }
    }
}

impl Settings {
    /// Applies a validated patch; provided month colors replace only their months
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(days) = patch.alert_window_days {
            self.alert_window_days = days;
        }
        for (month, color) in patch.month_colors {
            self.month_colors.set(month, color);
        }
    }
}

/// An update request as received, before validation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSettingsPatch {
    pub alert_window_days: Option<Value>,
    pub month_colors: Option<Value>,
}

/// A validated partial update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub alert_window_days: Option<u32>,
    pub month_colors: BTreeMap<u32, HexColor>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.alert_window_days.is_none() && self.month_colors.is_empty()
    }
}

impl TryFrom<RawSettingsPatch> for SettingsPatch {
    type Error = SettingsError;

    fn try_from(raw: RawSettingsPatch) -> Result<Self, Self::Error> {
        let alert_window_days = match raw.alert_window_days {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                value
                    .as_u64()
                    .filter(|d| *d >= 1)
                    .and_then(|d| u32::try_from(d).ok())
                    .ok_or(SettingsError::InvalidAlertWindow)?,
            ),
        };

        let mut month_colors = BTreeMap::new();
        match raw.month_colors {
            None | Some(Value::Null) => {}
            Some(Value::Object(entries)) => {
                for (key, value) in entries {
                    let month = key
                        .trim()
                        .parse::<u32>()
                        .ok()
                        .filter(|m| (1..=12).contains(m))
                        .ok_or_else(|| SettingsError::InvalidMonth(key.clone()))?;
                    match value {
                        Value::Null => continue,
                        Value::String(ref s) if s.is_empty() => continue,
                        Value::String(s) => {
                            let color = HexColor::parse(&s)
                                .map_err(|_| SettingsError::InvalidColor(month))?;
                            month_colors.insert(month, color);
                        }
                        _ => return Err(SettingsError::InvalidColor(month)),
                    }
                }
            }
            Some(_) => return Err(SettingsError::MonthColorsNotObject),
        }

        Ok(Self {
            alert_window_days,
            month_colors,
        })
    }
}
