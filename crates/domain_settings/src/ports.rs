//! Settings Domain Ports

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PortError};

use crate::settings::{Settings, SettingsPatch};

/// Storage for the settings singleton
#[async_trait]
pub trait SettingsPort: DomainPort + HealthCheckable {
    /// Returns the stored settings, creating the defaults if none exist
    async fn get_or_create(&self) -> Result<Settings, PortError>;

    /// Merges `patch` over the stored settings (creating them first if needed)
    async fn update(&self, patch: SettingsPatch) -> Result<Settings, PortError>;

    /// Replaces the stored settings with the defaults
    async fn reset(&self) -> Result<Settings, PortError>;
}

/// Mock implementation of SettingsPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::HealthCheckResult;

    #[derive(Debug, Default, Clone)]
    pub struct MockSettingsPort {
        settings: Arc<RwLock<Option<Settings>>>,
    }

    impl MockSettingsPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn with_settings(settings: Settings) -> Self {
            let port = Self::new();
            *port.settings.write().await = Some(settings);
            port
        }

        /// Whether the singleton has been created yet
        pub async fn is_initialized(&self) -> bool {
            self.settings.read().await.is_some()
        }
    }

    impl DomainPort for MockSettingsPort {}

    #[async_trait]
    impl HealthCheckable for MockSettingsPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-settings-port", 0)
        }
    }

    #[async_trait]
    impl SettingsPort for MockSettingsPort {
        async fn get_or_create(&self) -> Result<Settings, PortError> {
            let mut slot = self.settings.write().await;
            Ok(slot.get_or_insert_with(Settings::default).clone())
        }

        async fn update(&self, patch: SettingsPatch) -> Result<Settings, PortError> {
            let mut slot = self.settings.write().await;
            let settings = slot.get_or_insert_with(Settings::default);
            settings.apply(patch);
            Ok(settings.clone())
        }

        async fn reset(&self) -> Result<Settings, PortError> {
            let defaults = Settings::default();
            *self.settings.write().await = Some(defaults.clone());
            Ok(defaults)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockSettingsPort;
    use super::*;
    use crate::settings::HexColor;

    #[tokio::test]
    async fn test_lazily_created_on_first_read() {
        let port = MockSettingsPort::new();
        assert!(!port.is_initialized().await);
        let settings = port.get_or_create().await.unwrap();
        assert_eq!(settings, Settings::default());
        assert!(port.is_initialized().await);
    }

    #[tokio::test]
    async fn test_update_before_first_read_starts_from_defaults() {
        let port = MockSettingsPort::new();
        let mut patch = SettingsPatch::default();
        patch.month_colors.insert(2, HexColor::parse("#123456").unwrap());

        let updated = port.update(patch).await.unwrap();
        assert_eq!(updated.alert_window_days, 60);
        assert_eq!(updated.month_colors.get(2).unwrap().as_str(), "#123456");
        assert_eq!(updated.month_colors.get(1).unwrap().as_str(), "#ef4444");
    }

    #[tokio::test]
    async fn test_reset() {
        let port = MockSettingsPort::new();
        port.update(SettingsPatch {
            alert_window_days: Some(10),
            ..Default::default()
        })
        .await
        .unwrap();
        assert_eq!(port.reset().await.unwrap().alert_window_days, 60);
    }
}
