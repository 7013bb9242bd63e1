//! API configuration
//!
//! Values come from `CRM_`-prefixed environment variables (a `.env` file is
//! loaded first by the binaries), falling back to the defaults below.

use serde::Deserialize;

const DEV_JWT_SECRET: &str = "dev-secret-change-in-production";

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// HS256 signing secret
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Database URL
    pub database_url: String,
    /// Log level or `EnvFilter` directive
    pub log_level: String,
    /// Emit JSON log lines instead of the human-readable format
    pub log_json: bool,
    /// Comma-separated CORS origins
    pub allowed_origins: String,
    /// IANA timezone that decides what "today" is
    pub timezone: String,
    /// `development` or `production`
    pub environment: String,
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_expiration_secs: 7 * 24 * 60 * 60,
            database_url: "postgres://localhost/crm".to_string(),
            log_level: "info".to_string(),
            log_json: false,
            allowed_origins: "http://localhost:5173,http://localhost:3000".to_string(),
            timezone: "Europe/Madrid".to_string(),
            environment: "development".to_string(),
            bcrypt_cost: domain_user::BCRYPT_COST,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let config = config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("jwt_secret", defaults.jwt_secret)?
            .set_default("jwt_expiration_secs", defaults.jwt_expiration_secs as i64)?
            .set_default("database_url", defaults.database_url)?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_json", defaults.log_json)?
            .set_default("allowed_origins", defaults.allowed_origins)?
            .set_default("timezone", defaults.timezone)?
            .set_default("environment", defaults.environment)?
            .set_default("bcrypt_cost", i64::from(defaults.bcrypt_cost))?
            .add_source(config::Environment::with_prefix("CRM").try_parsing(true))
            .build()?
            .try_deserialize::<Self>()?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that must not reach production
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.is_production() && self.jwt_secret == DEV_JWT_SECRET {
            return Err(config::ConfigError::Message(
                "CRM_JWT_SECRET must be set in production".to_string(),
            ));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(config::ConfigError::Message(format!(
                "bcrypt_cost must be between 4 and 31, got {}",
                self.bcrypt_cost
            )));
        }
        Ok(())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:3001");
        assert_eq!(config.jwt_expiration_secs, 604_800);
        assert_eq!(config.bcrypt_cost, 10);
        assert!(!config.is_production());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_origins_split_and_trimmed() {
        let config = ApiConfig {
            allowed_origins: " https://crm.example.com , ,http://localhost:5173".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.origins(),
            vec!["https://crm.example.com", "http://localhost:5173"]
        );
    }

    #[test]
    fn test_production_requires_real_secret() {
        let mut config = ApiConfig {
            environment: "production".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.jwt_secret = "s3cr3t-from-vault".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bcrypt_cost_bounds() {
        let config = ApiConfig {
            bcrypt_cost: 3,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
