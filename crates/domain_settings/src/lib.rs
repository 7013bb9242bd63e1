//! Settings Domain
//!
//! A single settings record per deployment holds the dashboard alert window
//! and a display color for each month. The record is created with defaults
//! the first time it is read, and updated through validated partial patches
//! whose month colors are merged over the stored ones.

pub mod chip;
pub mod error;
pub mod ports;
pub mod settings;

pub use chip::{month_chip, text_tone, MonthChip, TextTone, FALLBACK_COLOR, MESES_CORTOS};
pub use error::SettingsError;
pub use ports::SettingsPort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockSettingsPort;
pub use settings::{
    HexColor, MonthColors, RawSettingsPatch, Settings, SettingsPatch, DEFAULT_ALERT_WINDOW_DAYS,
};
