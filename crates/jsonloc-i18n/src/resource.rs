//! Resource loading for per-culture JSON files

use crate::culture::Culture;
use crate::error::{I18nError, I18nResult};
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default directory holding resource files
pub const DEFAULT_BASE_DIR: &str = "Localization/Languages";

/// Default resource file extension
pub const DEFAULT_EXTENSION: &str = "json";

/// Immutable key/text mapping for one culture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMap {
    culture: Culture,
    entries: HashMap<String, String>,
}

impl ResourceMap {
    /// Wrap already-loaded entries
    pub fn new(culture: Culture, entries: HashMap<String, String>) -> Self {
        Self { culture, entries }
    }

    /// Parse a flat JSON object of string keys to string values
    pub fn from_json(culture: Culture, content: &str) -> Result<Self, serde_json::Error> {
        let entries: HashMap<String, String> = serde_json::from_str(content)?;
        Ok(Self::new(culture, entries))
    }

    /// Culture this map belongs to
    pub fn culture(&self) -> &Culture {
        &self.culture
    }

    /// Text stored under `key`; exact match only
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// All pairs, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// All keys, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Source of per-culture resource maps
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Load the full map for `culture`.
    ///
    /// Fails with [`I18nError::ResourceUnavailable`] when the resource is
    /// missing or its content is not a flat string map.
    async fn load(&self, culture: &Culture) -> I18nResult<Arc<ResourceMap>>;
}

/// Loads `<base_dir>/<culture>.<extension>` files, keeping each parsed map
/// for the lifetime of the store
#[derive(Debug)]
pub struct JsonResourceStore {
    /// Base directory for resource files
    base_dir: PathBuf,
    /// File extension without the dot
    extension: String,
    /// Successfully parsed maps by culture
    loaded: DashMap<Culture, Arc<ResourceMap>>,
}

impl JsonResourceStore {
    /// Create a store reading from `base_dir`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            extension: DEFAULT_EXTENSION.to_string(),
            loaded: DashMap::new(),
        }
    }

    /// Use a different file extension
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Path of the resource file for `culture`
    pub fn resource_path(&self, culture: &Culture) -> PathBuf {
        self.base_dir
            .join(format!("{}.{}", culture.name(), self.extension))
    }

    /// Whether `culture` has been loaded already
    pub fn is_loaded(&self, culture: &Culture) -> bool {
        self.loaded.contains_key(culture)
    }

    /// Cultures loaded so far
    pub fn loaded_cultures(&self) -> Vec<Culture> {
        self.loaded.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Base directory for resources
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    async fn read_resource(&self, culture: &Culture) -> I18nResult<ResourceMap> {
        let path = self.resource_path(culture);
        let unavailable = |reason: String| I18nError::ResourceUnavailable {
            culture: culture.name().to_string(),
            path: path.to_string_lossy().to_string(),
            reason,
        };

        debug!("Loading resource file: {:?}", path);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Resource file does not exist: {:?}", path);
                return Err(unavailable("resource file not found".to_string()));
            }
            Err(e) => {
                warn!("Failed to read resource file {:?}: {}", path, e);
                return Err(unavailable(e.to_string()));
            }
        };

        let map = ResourceMap::from_json(culture.clone(), &content).map_err(|e| {
            warn!("Failed to parse resource file {:?}: {}", path, e);
            unavailable(format!("invalid resource content: {e}"))
        })?;

        info!(
            "Loaded {} entries for culture {} from {:?}",
            map.len(),
            culture,
            path
        );
        Ok(map)
    }
}

impl Default for JsonResourceStore {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_DIR)
    }
}

#[async_trait]
impl ResourceStore for JsonResourceStore {
    async fn load(&self, culture: &Culture) -> I18nResult<Arc<ResourceMap>> {
        if let Some(map) = self.loaded.get(culture).map(|entry| Arc::clone(entry.value())) {
            return Ok(map);
        }

        let map = Arc::new(self.read_resource(culture).await?);
        self.loaded.insert(culture.clone(), Arc::clone(&map));
        Ok(map)
    }
}
