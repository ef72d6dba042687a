//! Configuration management for the eUsage review service

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Connection to the Okapi gateway fronting eusage-reports and erm-usage
#[derive(Debug, Deserialize, Clone)]
pub struct OkapiConfig {
    pub url: String,
    pub tenant: String,
    #[serde(default)]
    pub token: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    /// When set, logs are also written to a daily-rotated file in this directory
    #[serde(default)]
    pub directory: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReviewConfig {
    /// Number of report titles fetched per page
    pub page_limit: u32,
    /// Upper bound for a bulk "update matches" operation
    pub operation_timeout_secs: u64,
    /// Number of recent notifications kept for `/notifications`
    pub notification_capacity: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub okapi: OkapiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub review: ReviewConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // EUSAGE_OKAPI__TENANT=diku, EUSAGE_REVIEW__PAGE_LIMIT=500, ...
            .add_source(
                Environment::with_prefix("EUSAGE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("okapi.url", env::var("OKAPI_URL").ok())?
            .set_override_option("okapi.tenant", env::var("OKAPI_TENANT").ok())?
            .set_override_option("okapi.token", env::var("OKAPI_TOKEN").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8081,
        }
    }
}

impl Default for OkapiConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9130".to_string(),
            tenant: "diku".to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            directory: None,
        }
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            page_limit: 200,
            operation_timeout_secs: 600,
            notification_capacity: 100,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            okapi: OkapiConfig::default(),
            logging: LoggingConfig::default(),
            review: ReviewConfig::default(),
        }
    }
}
