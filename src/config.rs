//! Configuration management for the library administration backend

use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Which store implementation backs the repository
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Http,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub base_url: String,
    pub timeout_secs: u64,
    /// Page size the remote list endpoints are read with
    pub page_limit: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LendingConfig {
    /// Fine charged per overdue day
    pub fine_per_day: Decimal,
    /// Offset of the reference time zone, in minutes east of UTC
    pub utc_offset_minutes: i32,
    pub default_page_size: usize,
    pub max_page_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub lending: LendingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix LIBADMIN_, e.g. LIBADMIN_SERVER__PORT)
            .add_source(
                Environment::with_prefix("LIBADMIN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override store URL from STORE_URL env var if present
            .set_override_option("store.base_url", env::var("STORE_URL").ok())?
            .build()?;

        config.try_deserialize()
    }

    pub fn is_json_logging(&self) -> bool {
        self.logging.format.eq_ignore_ascii_case("json")
    }
}

impl LendingConfig {
    /// Page size for a request, falling back to the default and capped
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size.max(1))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Http,
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 10,
            page_limit: 100,
        }
    }
}

impl Default for LendingConfig {
    fn default() -> Self {
        Self {
            fine_per_day: Decimal::from(5),
            utc_offset_minutes: 0,
            default_page_size: 5,
            max_page_size: 100,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
