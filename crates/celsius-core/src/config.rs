use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::error::ConfigError;

/// Environment variable holding the OpenWeatherMap API key. Required.
pub const ENV_API_KEY: &str = "OPENWEATHER_API_KEY";
/// Optional override for the weather provider base URL.
pub const ENV_BASE_URL: &str = "CELSIUS_BASE_URL";
/// Optional path to the gazetteer dataset.
pub const ENV_CITIES_PATH: &str = "CELSIUS_CITIES_PATH";
/// Optional directory for locally persisted state.
pub const ENV_DATA_DIR: &str = "CELSIUS_DATA_DIR";

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Application configuration.
///
/// The whole surface is environment-supplied: the API credential plus a
/// handful of optional overrides. There is no config file and no CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeatherMap API key
    pub api_key: String,

    /// Weather provider base URL
    pub base_url: String,

    /// Path to the gazetteer dataset (cities.json)
    pub cities_path: PathBuf,

    /// Directory for locally persisted state (search history)
    pub data_dir: PathBuf,
}

impl Config {
    /// Build a configuration from an explicit API key and defaults for
    /// everything else.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            cities_path: PathBuf::from("cities.json"),
            data_dir: default_data_dir(),
        }
    }

    /// Load configuration from the environment.
    ///
    /// Fails fast when the API credential is absent: the service must not
    /// start and fail per-request later.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(ENV_API_KEY)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingSetting(ENV_API_KEY.to_string()))?;

        let mut config = Self::new(api_key);

        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Ok(path) = std::env::var(ENV_CITIES_PATH) {
            config.cities_path = PathBuf::from(path);
        }
        if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Load configuration from the environment and validate it.
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> anyhow::Result<(Self, ValidationResult)> {
        let config = Self::from_env()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.api_key.trim().is_empty() {
            result.add_error("api_key", "API key must not be empty");
        } else if self.api_key.len() < 16 {
            result.add_warning("api_key", "API key is unusually short");
        }

        self.validate_url(&self.base_url, "base_url", &mut result);

        if !self.cities_path.exists() {
            result.add_warning(
                "cities_path",
                format!("Dataset not found: {}", self.cities_path.display()),
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                // Check scheme
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                // Check host
                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                // Validate port if explicitly specified
                if let Some(port) = url.port() {
                    if port == 0 {
                        result.add_error(field_name, "Port cannot be 0");
                    }
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Path of the search-history database inside the data directory.
    pub fn history_db_path(&self) -> PathBuf {
        self.data_dir.join("history.db")
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("celsius")
}
