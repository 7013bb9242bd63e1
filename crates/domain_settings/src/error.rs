//! Settings domain errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("alertWindowDays debe ser un número mayor a 0")]
    InvalidAlertWindow,

    #[error("monthColors debe ser un objeto")]
    MonthColorsNotObject,

    #[error("Mes no válido en monthColors: {0}")]
    InvalidMonth(String),

    #[error("El color para el mes {0} no es válido. Debe ser un hex código (ej: #ff0000)")]
    InvalidColor(u32),

    #[error("Color no válido: {0}")]
    InvalidHex(String),
}
