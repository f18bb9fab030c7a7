//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for jsonloc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Localization configuration.
    pub localization: LocalizationConfig,
    /// Lookup cache configuration.
    pub cache: CacheConfig,
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Localization configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizationConfig {
    /// Directory holding one resource file per culture.
    pub resources_path: PathBuf,
    /// File extension of resource files, without the leading dot.
    pub extension: String,
    /// Culture used when a request names none or an unknown one.
    pub default_culture: String,
    /// Cultures a request may select.
    pub supported_cultures: Vec<String>,
    /// Load every supported culture's resource at startup.
    pub preload: bool,
}

/// Lookup cache configuration.
///
/// Every limit is optional; with none set, entries never expire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached entries.
    pub max_capacity: Option<u64>,
    /// Seconds an entry lives after insertion.
    pub time_to_live_seconds: Option<u64>,
    /// Seconds an entry lives after its last read.
    pub time_to_idle_seconds: Option<u64>,
}

impl CacheConfig {
    /// Time-to-live as a [`Duration`].
    pub fn time_to_live(&self) -> Option<Duration> {
        self.time_to_live_seconds.map(Duration::from_secs)
    }

    /// Time-to-idle as a [`Duration`].
    pub fn time_to_idle(&self) -> Option<Duration> {
        self.time_to_idle_seconds.map(Duration::from_secs)
    }

    /// Whether any eviction policy is configured.
    pub const fn is_bounded(&self) -> bool {
        self.max_capacity.is_some()
            || self.time_to_live_seconds.is_some()
            || self.time_to_idle_seconds.is_some()
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the server binds to.
    pub bind_address: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON formatted log lines.
    pub json: bool,
}
