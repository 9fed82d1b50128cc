use std::env;

use auth::TokenSettings;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub issuer: String,
    pub access_secret: String,
    pub refresh_secret: String,
    #[serde(default = "default_access_token_ttl_minutes")]
    pub access_token_ttl_minutes: i64,
    #[serde(default = "default_refresh_token_ttl_minutes")]
    pub refresh_token_ttl_minutes: i64,
}

/// Credentials of the account seeded on first start.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct BootstrapConfig {
    pub email: Option<String>,
    pub password: Option<String>,
}

fn default_access_token_ttl_minutes() -> i64 {
    15
}

fn default_refresh_token_ttl_minutes() -> i64 {
    7 * 24 * 60
}

impl JwtConfig {
    pub fn token_settings(&self) -> TokenSettings {
        TokenSettings {
            issuer: self.issuer.clone(),
            access_secret: self.access_secret.clone(),
            refresh_secret: self.refresh_secret.clone(),
            access_ttl: chrono::Duration::minutes(self.access_token_ttl_minutes),
            refresh_ttl: chrono::Duration::minutes(self.refresh_token_ttl_minutes),
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__ACCESS_SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: BOOTSTRAP__EMAIL=admin@example.com overrides bootstrap.email
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(toml: &str) -> Result<Config, ConfigError> {
        ConfigBuilder::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_ttl_defaults() {
        let config = from_toml(
            r#"
            [database]
            url = "postgresql://localhost/backoffice"
            [server]
            http_port = 8080
            [jwt]
            issuer = "backoffice"
            access_secret = "a"
            refresh_secret = "r"
            "#,
        )
        .unwrap();

        assert_eq!(config.jwt.access_token_ttl_minutes, 15);
        assert_eq!(config.jwt.refresh_token_ttl_minutes, 10080);
        assert!(config.bootstrap.email.is_none());

        let settings = config.jwt.token_settings();
        assert_eq!(settings.refresh_ttl, chrono::Duration::days(7));
    }

    #[test]
    fn test_missing_jwt_section_fails() {
        let result = from_toml(
            r#"
            [database]
            url = "postgresql://localhost/backoffice"
            [server]
            http_port = 8080
            "#,
        );

        assert!(result.is_err());
    }
}
