//! Configuration management for the `FloodWatch` service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::FloodWatchError;
use crate::risk::RiskThresholds;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `FloodWatch` service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FloodWatchConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Geocoding API settings
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Forecast API settings
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Risk classification thresholds
    #[serde(default)]
    pub risk: RiskThresholds,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_server_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Directory with a built dashboard to serve at `/`
    #[serde(default)]
    pub static_dir: Option<String>,
}

/// Geocoding API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL for the geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_seconds: u32,
}

/// Forecast API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Base URL for the forecast API
    #[serde(default = "default_forecast_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_forecast_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8000
}

fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_geocoding_timeout() -> u32 {
    10
}

fn default_forecast_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_forecast_timeout() -> u32 {
    20
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            static_dir: None,
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_seconds: default_geocoding_timeout(),
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            base_url: default_forecast_base_url(),
            timeout_seconds: default_forecast_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl FloodWatchConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Seed every threshold so a single bound can be overridden on its own
        let thresholds = RiskThresholds::default();
        for (dimension, levels) in [
            ("flood", thresholds.flood),
            ("heat", thresholds.heat),
            ("storm", thresholds.storm),
        ] {
            builder = builder
                .set_default(format!("risk.{dimension}.medium"), levels.medium)
                .and_then(|builder| {
                    builder.set_default(format!("risk.{dimension}.high"), levels.high)
                })
                .with_context(|| format!("Failed to seed {dimension} thresholds"))?;
        }

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. FLOODWATCH_SERVER__PORT=9000
        builder = builder.add_source(
            Environment::with_prefix("FLOODWATCH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: FloodWatchConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("floodwatch").join("config.toml"))
    }

    /// Address the server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.geocoding.base_url.is_empty() {
            self.geocoding.base_url = default_geocoding_base_url();
        }
        if self.geocoding.timeout_seconds == 0 {
            self.geocoding.timeout_seconds = default_geocoding_timeout();
        }
        if self.forecast.base_url.is_empty() {
            self.forecast.base_url = default_forecast_base_url();
        }
        if self.forecast.timeout_seconds == 0 {
            self.forecast.timeout_seconds = default_forecast_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self
            .server
            .static_dir
            .as_deref()
            .is_some_and(|dir| dir.trim().is_empty())
        {
            self.server.static_dir = None;
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.risk.validate()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.geocoding.timeout_seconds > 300 {
            return Err(
                FloodWatchError::config("Geocoding API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.forecast.timeout_seconds > 300 {
            return Err(
                FloodWatchError::config("Forecast API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.server.port == 0 {
            return Err(FloodWatchError::config("Server port cannot be 0").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(FloodWatchError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(FloodWatchError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Geocoding", &self.geocoding.base_url),
            ("Forecast", &self.forecast.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(FloodWatchError::config(format!(
                    "{name} API base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::LevelThresholds;
    use std::env;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = FloodWatchConfig::default();
        assert_eq!(
            config.geocoding.base_url,
            "https://geocoding-api.open-meteo.com/v1"
        );
        assert_eq!(config.geocoding.timeout_seconds, 10);
        assert_eq!(config.forecast.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.forecast.timeout_seconds, 20);
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.risk, RiskThresholds::default());
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = FloodWatchConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_invalid_log_format() {
        let mut config = FloodWatchConfig::default();
        config.logging.format = "xml".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Invalid log format"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = FloodWatchConfig::default();
        config.forecast.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_base_url() {
        let mut config = FloodWatchConfig::default();
        config.geocoding.base_url = "ftp://example.com".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Geocoding API base URL"));
    }

    #[test]
    fn test_config_validation_thresholds() {
        let mut config = FloodWatchConfig::default();
        config.risk.flood = LevelThresholds::new(60.0, 50.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults() {
        let mut config = FloodWatchConfig::default();
        config.geocoding.timeout_seconds = 0;
        config.forecast.base_url = String::new();
        config.server.static_dir = Some("  ".to_string());
        config.apply_defaults();
        assert_eq!(config.geocoding.timeout_seconds, 10);
        assert_eq!(config.forecast.base_url, "https://api.open-meteo.com/v1");
        assert!(config.server.static_dir.is_none());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = env::temp_dir().join(format!("floodwatch-test-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9100

[forecast]
timeout_seconds = 45

[risk.flood]
medium = 20.0
high = 40.0
"#
        )
        .unwrap();

        let config = FloodWatchConfig::load_from_path(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.forecast.timeout_seconds, 45);
        assert_eq!(config.geocoding.timeout_seconds, 10);
        assert_eq!(config.risk.flood, LevelThresholds::new(20.0, 40.0));
        assert_eq!(config.risk.heat, RiskThresholds::default().heat);
    }

    #[test]
    fn test_single_threshold_bound_override() {
        let path = env::temp_dir().join(format!(
            "floodwatch-threshold-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[risk.flood]\nhigh = 45.0\n").unwrap();

        let config = FloodWatchConfig::load_from_path(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.risk.flood, LevelThresholds::new(30.0, 45.0));
        assert_eq!(config.risk.heat, RiskThresholds::default().heat);
        assert_eq!(config.risk.storm, RiskThresholds::default().storm);
    }

    #[test]
    fn test_config_path_generation() {
        let path = FloodWatchConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("floodwatch"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
