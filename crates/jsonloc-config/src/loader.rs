//! Configuration loading utilities

use crate::schema::Config;
use crate::validator::ConfigValidator;
use jsonloc_common::{JsonlocError, Result as JsonlocResult};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "JSONLOC_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File extension is not one of yaml, yml, toml or json
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Configuration validation error
    #[error("Configuration validation failed: {}", .0.join("; "))]
    ValidationError(Vec<String>),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Name of the variable
        var: String,
        /// Parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for JsonlocError {
    fn from(err: ConfigError) -> Self {
        Self::config(err.to_string())
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file with environment variable overrides.
    ///
    /// The format is picked from the extension: `yaml`/`yml`, `toml` or `json`.
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        debug!("Loading configuration from {:?}", path);

        let mut config = Self::parse_file(path)?;
        Self::apply_env_overrides(&mut config)?;
        ConfigValidator::validate(&config).map_err(ConfigError::ValidationError)?;

        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load configuration from the environment and well-known files.
    ///
    /// Lookup order: `JSONLOC_CONFIG_PATH`, `config.yaml`, `config.yml`,
    /// `config.toml`, then built-in defaults. Environment overrides apply in
    /// every case.
    pub fn load() -> JsonlocResult<Config> {
        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            return Ok(Self::load_config(&config_path)?);
        }

        for candidate in ["config.yaml", "config.yml", "config.toml"] {
            if Path::new(candidate).exists() {
                return Ok(Self::load_config(candidate)?);
            }
        }

        info!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        ConfigValidator::validate(&config).map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> JsonlocResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Parses a configuration file without overrides or validation.
    pub fn parse_file(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml" | "yml") => Ok(serde_yaml::from_str(&content)?),
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |var| env::var(var).ok())
    }

    /// Apply overrides read through `lookup`, one variable at a time.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("JSONLOC_RESOURCES_PATH") {
            config.localization.resources_path = PathBuf::from(path);
        }

        if let Some(culture) = lookup("JSONLOC_DEFAULT_CULTURE") {
            config.localization.default_culture = culture.trim().to_string();
        }

        if let Some(cultures) = lookup("JSONLOC_SUPPORTED_CULTURES") {
            config.localization.supported_cultures = cultures
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(address) = lookup("JSONLOC_BIND_ADDRESS") {
            config.server.bind_address = address;
        }

        if let Some(capacity) = lookup("JSONLOC_CACHE_MAX_CAPACITY") {
            config.cache.max_capacity = Some(parse_var("JSONLOC_CACHE_MAX_CAPACITY", &capacity)?);
        }

        if let Some(ttl) = lookup("JSONLOC_CACHE_TTL_SECONDS") {
            config.cache.time_to_live_seconds = Some(parse_var("JSONLOC_CACHE_TTL_SECONDS", &ttl)?);
        }

        if let Some(tti) = lookup("JSONLOC_CACHE_TTI_SECONDS") {
            config.cache.time_to_idle_seconds = Some(parse_var("JSONLOC_CACHE_TTI_SECONDS", &tti)?);
        }

        if let Some(level) = lookup("JSONLOC_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

fn parse_var(var: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::EnvParseError {
            var: var.to_string(),
            source: Box::new(e),
        })
}
