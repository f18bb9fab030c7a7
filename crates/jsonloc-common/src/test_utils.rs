//! Test utilities and shared test helpers for jsonloc.
//!
//! This module provides logging setup and resource fixtures that can be used
//! across all crates in the workspace for unit and integration testing.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Resource fixtures matching the reference deployment.
pub mod resource_fixtures {
    use super::*;

    /// Contents of the reference `en-US.json` resource.
    pub const EN_US_JSON: &str = r#"{
  "hi": "Hello!",
  "welcome": "Welcome, {0}!",
  "goodbye": "Goodbye, {0}. See you {1}!",
  "braces": "Use {{0}} for the first argument"
}"#;

    /// Contents of the reference `pt-BR.json` resource.
    pub const PT_BR_JSON: &str = r#"{
  "hi": "Olá!",
  "welcome": "Bem-vindo, {0}!",
  "goodbye": "Tchau, {0}. Até {1}!"
}"#;

    /// Writes a resource file named `<culture>.json` into `dir`.
    pub fn write_resource(dir: &Path, culture: &str, content: &str) -> PathBuf {
        fs::create_dir_all(dir).expect("Failed to create resource directory");
        let path = dir.join(format!("{culture}.json"));
        fs::write(&path, content).expect("Failed to write resource file");
        path
    }

    /// Writes both reference resources (`en-US`, `pt-BR`) into `dir`.
    pub fn write_reference_resources(dir: &Path) {
        write_resource(dir, "en-US", EN_US_JSON);
        write_resource(dir, "pt-BR", PT_BR_JSON);
    }

    /// Creates a temporary directory holding the reference resources.
    pub fn reference_resource_dir() -> tempfile::TempDir {
        let dir = create_temp_dir();
        write_reference_resources(dir.path());
        dir
    }

    /// Key set of a JSON resource, sorted, for comparisons in tests.
    pub fn resource_keys(content: &str) -> Vec<String> {
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(content).expect("fixture is a JSON object");
        let mut keys: Vec<String> = map.keys().cloned().collect();
        keys.sort();
        keys
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Create a minimal valid test configuration as YAML string.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
localization:
  resources_path: "Localization/Languages"
  default_culture: "en-US"
  supported_cultures:
    - "pt-BR"
    - "en-US"
"#
    }

    /// Create a full test configuration as YAML string.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "localization:\n",
            "  resources_path: \"Localization/Languages\"\n",
            "  extension: \"json\"\n",
            "  default_culture: \"en-US\"\n",
            "  supported_cultures:\n",
            "    - \"pt-BR\"\n",
            "    - \"en-US\"\n",
            "  preload: true\n",
            "\n",
            "cache:\n",
            "  max_capacity: 10000\n",
            "  time_to_live_seconds: 3600\n",
            "  time_to_idle_seconds: 600\n",
            "\n",
            "server:\n",
            "  bind_address: \"127.0.0.1:8080\"\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  json: true\n"
        )
    }
}
