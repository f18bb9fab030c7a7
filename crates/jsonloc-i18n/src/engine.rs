//! Localization engine and per-request string localizers

use crate::cache::{CachePolicy, CacheStats, LocalizationCache};
use crate::context::RequestCulture;
use crate::culture::{Culture, KnownCultures};
use crate::error::{I18nError, I18nResult};
use crate::format::format_positional;
use crate::resolver::CultureResolver;
use crate::resource::{JsonResourceStore, ResourceStore};
use jsonloc_config::Config;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of a single string lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedValue {
    /// Lookup key
    pub name: String,
    /// Resolved text, or the key itself when nothing was found
    pub value: String,
    /// Whether the key was missing for the active culture
    pub resource_not_found: bool,
}

impl LocalizedValue {
    /// A value resolved from a resource
    pub fn found(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            resource_not_found: false,
        }
    }

    /// The fallback for a missing key: the text is the key itself
    pub fn not_found(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            value: name.clone(),
            name,
            resource_not_found: true,
        }
    }
}

impl fmt::Display for LocalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Shared lookup machinery: a resource store, the string cache and culture
/// negotiation.
///
/// The engine holds no per-request state. Callers resolve a culture for each
/// request and obtain a [`StringLocalizer`] bound to it.
pub struct LocalizationEngine {
    store: Arc<dyn ResourceStore>,
    cache: LocalizationCache,
    resolver: CultureResolver,
}

impl fmt::Debug for LocalizationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalizationEngine")
            .field("cache", &self.cache)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

impl LocalizationEngine {
    /// Assemble an engine from its parts
    pub fn new(
        store: Arc<dyn ResourceStore>,
        cache: LocalizationCache,
        resolver: CultureResolver,
    ) -> Self {
        Self {
            store,
            cache,
            resolver,
        }
    }

    /// Build the file-backed engine described by `config`
    pub fn from_config(config: &Config) -> I18nResult<Self> {
        let localization = &config.localization;
        let default = Culture::parse(&localization.default_culture)?;
        let known = KnownCultures::from_tags(&localization.supported_cultures)?;

        let store = JsonResourceStore::new(&localization.resources_path)
            .with_extension(localization.extension.clone());
        let cache = LocalizationCache::new(CachePolicy::from(&config.cache));

        info!(
            resources_path = %localization.resources_path.display(),
            default_culture = %default,
            cultures = known.len(),
            bounded_cache = config.cache.is_bounded(),
            "Localization engine configured"
        );

        Ok(Self::new(
            Arc::new(store),
            cache,
            CultureResolver::new(default, known),
        ))
    }

    /// Select the culture for a request's language preference
    pub fn resolve(&self, requested: Option<&str>) -> RequestCulture {
        self.resolver.resolve_request(requested)
    }

    /// Localizer bound to `culture`
    pub fn localizer(&self, culture: &Culture) -> StringLocalizer<'_> {
        StringLocalizer {
            engine: self,
            culture: culture.clone(),
        }
    }

    /// Localizer bound to the active culture of a request
    pub fn localizer_for(&self, request: &RequestCulture) -> StringLocalizer<'_> {
        self.localizer(request.culture())
    }

    /// The culture resolver
    pub fn resolver(&self) -> &CultureResolver {
        &self.resolver
    }

    /// The configured default culture
    pub fn default_culture(&self) -> &Culture {
        self.resolver.default_culture()
    }

    /// Cultures requests may select
    pub fn known_cultures(&self) -> &KnownCultures {
        self.resolver.known_cultures()
    }

    /// Load the resource of every known culture ahead of traffic.
    ///
    /// Returns the cultures that loaded; the others are logged and skipped.
    pub async fn warm_up(&self) -> Vec<Culture> {
        let mut loaded = Vec::new();
        for culture in self.known_cultures().iter() {
            match self.store.load(culture).await {
                Ok(map) => {
                    debug!(culture = %culture, entries = map.len(), "Preloaded resource");
                    loaded.push(culture.clone());
                }
                Err(e) => warn!(culture = %culture, error = %e, "Skipping preload"),
            }
        }
        info!(
            "Preloaded {}/{} culture resources",
            loaded.len(),
            self.known_cultures().len()
        );
        loaded
    }

    /// Cache statistics snapshot
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Drop every cached string
    pub async fn clear_cache(&self) {
        self.cache.invalidate_all().await;
    }

    async fn lookup(&self, culture: &Culture, key: &str) -> Option<String> {
        let store = &self.store;
        self.cache
            .get_or_load(culture, key, move || async move {
                match store.load(culture).await {
                    Ok(map) => map.get(key).map(str::to_string),
                    Err(e) => {
                        warn!(error = %e, "Resource unavailable, treating '{}' as not found", key);
                        None
                    }
                }
            })
            .await
    }
}

/// String lookups for one culture.
///
/// Created per request from a shared [`LocalizationEngine`].
#[derive(Debug, Clone)]
pub struct StringLocalizer<'a> {
    engine: &'a LocalizationEngine,
    culture: Culture,
}

impl StringLocalizer<'_> {
    /// Culture this localizer resolves against
    pub fn culture(&self) -> &Culture {
        &self.culture
    }

    /// Text for `key`, or the key itself flagged as not found
    pub async fn get(&self, key: &str) -> LocalizedValue {
        match self.engine.lookup(&self.culture, key).await {
            Some(value) => LocalizedValue::found(key, value),
            None => {
                debug!(culture = %self.culture, "No resource for key '{}'", key);
                LocalizedValue::not_found(key)
            }
        }
    }

    /// Text for `key` with `args` substituted into its positional
    /// placeholders.
    ///
    /// A missing key is returned unformatted. Arguments that do not fit the
    /// template fail with [`I18nError::FormatMismatch`].
    pub async fn get_formatted<A: ToString>(
        &self,
        key: &str,
        args: &[A],
    ) -> I18nResult<LocalizedValue> {
        let args: Vec<String> = args.iter().map(ToString::to_string).collect();
        let localized = self.get(key).await;
        if localized.resource_not_found {
            return Ok(localized);
        }

        let value = format_positional(&localized.value, &args).map_err(|source| {
            I18nError::FormatMismatch {
                key: key.to_string(),
                source,
            }
        })?;
        Ok(LocalizedValue::found(key, value))
    }

    /// Every string of the active culture, in no particular order.
    ///
    /// Reads the resource directly rather than through the string cache.
    pub async fn get_all(&self) -> I18nResult<Vec<LocalizedValue>> {
        let map = self.engine.store.load(&self.culture).await?;
        Ok(map
            .iter()
            .map(|(name, value)| LocalizedValue::found(name, value))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonloc_common::test_utils::resource_fixtures;
    use jsonloc_config::Config;

    fn engine_for(dir: &std::path::Path) -> LocalizationEngine {
        let mut config = Config::default();
        config.localization.resources_path = dir.to_path_buf();
        LocalizationEngine::from_config(&config).unwrap()
    }

    #[test]
    fn test_not_found_value_echoes_key() {
        let value = LocalizedValue::not_found("missing");
        assert_eq!(value.value, "missing");
        assert!(value.resource_not_found);
        assert_eq!(value.to_string(), "missing");
    }

    #[test]
    fn test_serializes_in_camel_case() {
        let json = serde_json::to_value(LocalizedValue::found("hi", "Hello!")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "hi", "value": "Hello!", "resourceNotFound": false})
        );
    }

    #[test]
    fn test_from_config_rejects_bad_default() {
        let mut config = Config::default();
        config.localization.default_culture = "english".to_string();
        assert!(matches!(
            LocalizationEngine::from_config(&config),
            Err(I18nError::InvalidCulture(_))
        ));
    }

    #[tokio::test]
    async fn test_get_and_fallback() {
        let dir = resource_fixtures::reference_resource_dir();
        let engine = engine_for(dir.path());
        let en = engine.resolve(Some("en-US"));
        let localizer = engine.localizer_for(&en);

        assert_eq!(localizer.get("hi").await, LocalizedValue::found("hi", "Hello!"));
        assert_eq!(localizer.get("nope").await, LocalizedValue::not_found("nope"));
    }

    #[tokio::test]
    async fn test_get_formatted() {
        let dir = resource_fixtures::reference_resource_dir();
        let engine = engine_for(dir.path());
        let localizer = engine.localizer(engine.default_culture());

        let welcome = localizer.get_formatted("welcome", &["Ana"]).await.unwrap();
        assert_eq!(welcome.value, "Welcome, Ana!");
        assert!(!welcome.resource_not_found);

        let missing = localizer.get_formatted("nope", &["Ana"]).await.unwrap();
        assert_eq!(missing, LocalizedValue::not_found("nope"));

        let braces = localizer.get_formatted::<&str>("braces", &[]).await.unwrap();
        assert_eq!(braces.value, "Use {0} for the first argument");
    }

    #[tokio::test]
    async fn test_get_formatted_mismatch_surfaces() {
        let dir = resource_fixtures::reference_resource_dir();
        let engine = engine_for(dir.path());
        let localizer = engine.localizer(engine.default_culture());

        let too_few = localizer.get_formatted("goodbye", &["Ana"]).await;
        assert!(matches!(too_few, Err(I18nError::FormatMismatch { ref key, .. }) if key == "goodbye"));

        let unexpected = localizer.get_formatted("hi", &["Ana"]).await;
        assert!(matches!(unexpected, Err(I18nError::FormatMismatch { .. })));
    }

    #[tokio::test]
    async fn test_missing_resource_is_absorbed_by_get_but_not_get_all() {
        let dir = tempfile::tempdir().unwrap();
        resource_fixtures::write_resource(dir.path(), "en-US", resource_fixtures::EN_US_JSON);
        let engine = engine_for(dir.path());
        let pt = engine.resolve(Some("pt-BR"));
        assert!(!pt.is_fallback());
        let localizer = engine.localizer_for(&pt);

        assert_eq!(localizer.get("hi").await, LocalizedValue::not_found("hi"));
        assert!(matches!(
            localizer.get_all().await,
            Err(I18nError::ResourceUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_warm_up_skips_missing_cultures() {
        let dir = tempfile::tempdir().unwrap();
        resource_fixtures::write_resource(dir.path(), "pt-BR", resource_fixtures::PT_BR_JSON);
        let engine = engine_for(dir.path());

        let loaded = engine.warm_up().await;
        let names: Vec<&str> = loaded.iter().map(Culture::name).collect();
        assert_eq!(names, vec!["pt-BR"]);
    }
}
