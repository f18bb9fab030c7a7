//! Default values matching the reference deployment.

use crate::schema::*;
use std::path::PathBuf;

/// Default directory of the resource files.
pub const DEFAULT_RESOURCES_PATH: &str = "Localization/Languages";
/// Default resource file extension.
pub const DEFAULT_EXTENSION: &str = "json";
/// Default culture.
pub const DEFAULT_CULTURE: &str = "en-US";
/// Cultures supported out of the box.
pub const DEFAULT_SUPPORTED_CULTURES: [&str; 2] = ["pt-BR", "en-US"];
/// Default bind address of the HTTP server.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

impl Default for Config {
    fn default() -> Self {
        Self {
            localization: LocalizationConfig::default(),
            cache: CacheConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            resources_path: PathBuf::from(DEFAULT_RESOURCES_PATH),
            extension: DEFAULT_EXTENSION.to_string(),
            default_culture: DEFAULT_CULTURE.to_string(),
            supported_cultures: DEFAULT_SUPPORTED_CULTURES
                .iter()
                .map(ToString::to_string)
                .collect(),
            preload: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
