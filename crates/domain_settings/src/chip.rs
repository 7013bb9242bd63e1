//! Month chip presentation
//!
//! The short colored month badge shown next to every expiration date.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::settings::{HexColor, Settings};

pub const MESES_CORTOS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

/// Used for months without a configured color
pub const FALLBACK_COLOR: &str = "#6b7280";

/// Text color class readable on a given background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextTone {
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthChip {
    pub mes: u32,
    pub label: String,
    pub color: String,
    pub text_tone: TextTone,
}

/// Dark text when perceived brightness exceeds 155
pub fn text_tone(color: &HexColor) -> TextTone {
    let (r, g, b) = color.rgb();
    let weighted = u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114;
    if weighted > 155 * 1000 {
        TextTone::Dark
    } else {
        TextTone::Light
    }
}

/// Chip for the month `date` falls in
pub fn month_chip(settings: &Settings, date: NaiveDate) -> MonthChip {
    let month = date.month();
    let color = settings
        .month_colors
        .get(month)
        .cloned()
        .unwrap_or_else(|| HexColor::trusted(FALLBACK_COLOR));

    MonthChip {
        mes: month,
        label: MESES_CORTOS[date.month0() as usize].to_string(),
        text_tone: text_tone(&color),
        color: color.to_string(),
    }
}
