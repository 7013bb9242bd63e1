//! Settings repository
//!
//! `app_settings` holds at most one row (`id = 1`). It is created lazily with
//! `INSERT ... ON CONFLICT DO NOTHING`, so concurrent first reads are safe.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use domain_settings::{MonthColors, Settings, SettingsPatch};

use crate::error::DatabaseError;

#[derive(Debug, Clone, FromRow)]
pub struct SettingsRow {
    pub alert_window_days: i32,
    pub month_colors: Json<MonthColors>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_or_create(&self) -> Result<SettingsRow, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let row = Self::ensure_row(&mut tx, false).await?;
        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;
        Ok(row)
    }

    /// Merges `patch` over the stored row under a row lock
    pub async fn update(&self, patch: SettingsPatch) -> Result<SettingsRow, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let current = Self::ensure_row(&mut tx, true).await?;

        let mut settings = row_to_settings(current)?;
        settings.apply(patch);

        let row = sqlx::query_as::<_, SettingsRow>(
            "UPDATE app_settings \
             SET alert_window_days = $1, month_colors = $2, updated_at = now() \
             WHERE id = 1 \
             RETURNING alert_window_days, month_colors, updated_at",
        )
        .bind(days_to_column(settings.alert_window_days)?)
        .bind(Json(&settings.month_colors))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;
        Ok(row)
    }

    pub async fn reset(&self) -> Result<SettingsRow, DatabaseError> {
        let defaults = Settings::default();
        let row = sqlx::query_as::<_, SettingsRow>(
            "INSERT INTO app_settings (id, alert_window_days, month_colors) VALUES (1, $1, $2) \
             ON CONFLICT (id) DO UPDATE \
             SET alert_window_days = EXCLUDED.alert_window_days, \
                 month_colors = EXCLUDED.month_colors, \
                 updated_at = now() \
             RETURNING alert_window_days, month_colors, updated_at",
        )
        .bind(days_to_column(defaults.alert_window_days)?)
        .bind(Json(&defaults.month_colors))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&self) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM app_settings").execute(&self.pool).await?;
        Ok(())
    }

    async fn ensure_row(
        tx: &mut Transaction<'_, Postgres>,
        for_update: bool,
    ) -> Result<SettingsRow, DatabaseError> {
        let defaults = Settings::default();
        sqlx::query(
            "INSERT INTO app_settings (id, alert_window_days, month_colors) VALUES (1, $1, $2) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(days_to_column(defaults.alert_window_days)?)
        .bind(Json(&defaults.month_colors))
        .execute(&mut **tx)
        .await?;

        let sql = if for_update {
            "SELECT alert_window_days, month_colors, updated_at FROM app_settings WHERE id = 1 FOR UPDATE"
        } else {
            "SELECT alert_window_days, month_colors, updated_at FROM app_settings WHERE id = 1"
        };
        let row = sqlx::query_as::<_, SettingsRow>(sql)
            .fetch_one(&mut **tx)
            .await?;
        Ok(row)
    }
}

pub fn row_to_settings(row: SettingsRow) -> Result<Settings, DatabaseError> {
    let alert_window_days = u32::try_from(row.alert_window_days)
        .map_err(|_| DatabaseError::serialization("alert_window_days", row.alert_window_days))?;
    Ok(Settings {
        alert_window_days,
        month_colors: row.month_colors.0,
    })
}

fn days_to_column(days: u32) -> Result<i32, DatabaseError> {
    i32::try_from(days).map_err(|_| DatabaseError::serialization("alert_window_days", days))
}
