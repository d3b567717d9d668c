//! Configuration management for ScholNet binaries
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config.toml, config.yaml)
//! - Default values

use chrono::NaiveDate;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Database configuration
    pub database: DatabaseConfig,

    /// OpenAlex API configuration
    pub openalex: OpenAlexConfig,

    /// Record filtering configuration
    pub filter: FilterConfig,

    /// Report output configuration
    pub report: ReportConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,

    /// Maximum number of connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Idle timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAlexConfig {
    /// API base URL
    #[serde(default = "default_openalex_base")]
    pub base_url: String,

    /// Contact address appended to the User-Agent (OpenAlex polite pool)
    pub mailto: Option<String>,

    /// Concept ids to fetch works for
    #[serde(default)]
    pub concept_ids: Vec<String>,

    /// Page size for cursor pagination
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Request timeout in seconds
    #[serde(default = "default_api_timeout")]
    pub timeout_secs: u64,

    /// Maximum elapsed retry time in seconds for transient API failures
    #[serde(default = "default_retry_window")]
    pub retry_window_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterConfig {
    /// Publication types kept by the post-load filtering pass
    #[serde(default = "default_allowed_types")]
    pub allowed_types: Vec<String>,

    /// Works published on or after this date are removed
    pub cutoff_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Directory the network report is written to
    #[serde(default = "default_report_dir")]
    pub output_dir: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,
}

// Default value functions
fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 10 }
fn default_idle_timeout() -> u64 { 300 }
fn default_openalex_base() -> String { "https://api.openalex.org".to_string() }
fn default_per_page() -> u32 { 100 }
fn default_api_timeout() -> u64 { 30 }
fn default_retry_window() -> u64 { 120 }
fn default_allowed_types() -> Vec<String> {
    [
        "journal-article",
        "proceedings-article",
        "book",
        "book-chapter",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_report_dir() -> String { "reports".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { false }

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))
            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // Load local overrides
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables with APP__ prefix
            // e.g., APP__DATABASE__URL=postgres://...
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get database connection timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.database.connect_timeout_secs)
    }

    /// Get API request timeout as Duration
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.openalex.timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgres://localhost/scholnet".to_string(),
                max_connections: default_max_connections(),
                min_connections: default_min_connections(),
                connect_timeout_secs: default_connect_timeout(),
                idle_timeout_secs: default_idle_timeout(),
            },
            openalex: OpenAlexConfig {
                base_url: default_openalex_base(),
                mailto: None,
                concept_ids: Vec::new(),
                per_page: default_per_page(),
                timeout_secs: default_api_timeout(),
                retry_window_secs: default_retry_window(),
            },
            filter: FilterConfig {
                allowed_types: default_allowed_types(),
                cutoff_date: None,
            },
            report: ReportConfig {
                output_dir: default_report_dir(),
            },
            observability: ObservabilityConfig {
                log_level: default_log_level(),
                json_logging: default_json_logging(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.openalex.per_page, 100);
        assert_eq!(config.openalex.base_url, "https://api.openalex.org");
        assert_eq!(config.filter.allowed_types.len(), 4);
        assert!(config.filter.cutoff_date.is_none());
    }

    #[test]
    fn test_timeouts() {
        let config = AppConfig::default();
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.api_timeout(), Duration::from_secs(30));
    }
}
