//! PostgreSQL settings adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_settings::{Settings, SettingsPatch, SettingsPort};

use crate::repositories::settings::{row_to_settings, SettingsRepository};

const ADAPTER_ID: &str = "postgres-settings-adapter";

#[derive(Debug, Clone)]
pub struct PostgresSettingsAdapter {
    repository: SettingsRepository,
    pool: PgPool,
}

impl PostgresSettingsAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: SettingsRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn repository(&self) -> &SettingsRepository {
        &self.repository
    }
}

impl DomainPort for PostgresSettingsAdapter {}

#[async_trait]
impl HealthCheckable for PostgresSettingsAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, ADAPTER_ID).await
    }
}

#[async_trait]
impl SettingsPort for PostgresSettingsAdapter {
    #[instrument(skip(self))]
    async fn get_or_create(&self) -> Result<Settings, PortError> {
        let row = self.repository.get_or_create().await?;
        Ok(row_to_settings(row)?)
    }

    #[instrument(skip(self, patch), fields(
        alert_window_days = ?patch.alert_window_days,
        month_colors = patch.month_colors.len(),
    ))]
    async fn update(&self, patch: SettingsPatch) -> Result<Settings, PortError> {
        let row = self.repository.update(patch).await?;
        info!("Settings updated");
        Ok(row_to_settings(row)?)
    }

    #[instrument(skip(self))]
    async fn reset(&self) -> Result<Settings, PortError> {
        let row = self.repository.reset().await?;
        info!("Settings reset to defaults");
        Ok(row_to_settings(row)?)
    }
}
