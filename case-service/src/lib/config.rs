use std::env;
use std::path::PathBuf;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for case-service.
///
/// Loaded once at startup and shared read-only afterwards.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub token: TokenConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub invoice: InvoiceConfig,
}

/// PostgreSQL database configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Session token configuration.
#[derive(Deserialize, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

/// Blob storage configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub root: PathBuf,
}

/// Invoice numbering configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct InvoiceConfig {
    pub max_numbering_attempts: u32,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            max_numbering_attempts: 5,
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. Environment variables (DATABASE__URL, TOKEN__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Returns error if required configuration values are missing or invalid
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: TOKEN__SECRET=... overrides token.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}
