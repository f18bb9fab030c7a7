//! Cache-aside layer for resolved strings

use crate::culture::Culture;
use jsonloc_config::CacheConfig;
use moka::future::Cache;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Namespace tag shared by every localized-string cache key
pub const CACHE_NAMESPACE: &str = "locale";

/// Eviction policy for the cache; every limit is optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachePolicy {
    /// Maximum number of entries
    pub max_capacity: Option<u64>,
    /// Lifetime after insertion
    pub time_to_live: Option<Duration>,
    /// Lifetime after the last read
    pub time_to_idle: Option<Duration>,
}

impl From<&CacheConfig> for CachePolicy {
    fn from(config: &CacheConfig) -> Self {
        Self {
            max_capacity: config.max_capacity,
            time_to_live: config.time_to_live(),
            time_to_idle: config.time_to_idle(),
        }
    }
}

/// Structured cache key: namespace, culture and resource key
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct CacheKey {
    namespace: &'static str,
    culture: Culture,
    key: String,
}

impl CacheKey {
    /// Key for `key` under `culture`
    pub fn new(culture: &Culture, key: &str) -> Self {
        Self {
            namespace: CACHE_NAMESPACE,
            culture: culture.clone(),
            key: key.to_string(),
        }
    }

    /// Culture component
    pub fn culture(&self) -> &Culture {
        &self.culture
    }

    /// Resource key component
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.namespace, self.culture, self.key)
    }
}

/// Cache performance counters
#[derive(Debug, Default)]
pub struct CacheMetrics {
    /// Lookups answered from the cache
    pub hits: AtomicU64,
    /// Lookups that fell through to the loader
    pub misses: AtomicU64,
    /// Loaded values stored in the cache
    pub inserts: AtomicU64,
}

impl CacheMetrics {
    /// Count one cache hit
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one cache miss
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one stored value
    pub fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    /// Fraction of lookups served from the cache, or 0.0 before any lookup
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed) as f64;
        let total = hits + self.misses.load(Ordering::Relaxed) as f64;
        if total > 0.0 {
            hits / total
        } else {
            0.0
        }
    }
}

/// Point-in-time view of the cache counters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that ran the loader
    pub misses: u64,
    /// Values stored after a miss
    pub inserts: u64,
    /// Entries currently held
    pub entries: u64,
    /// `hits / (hits + misses)`, or 0 before any lookup
    pub hit_rate: f64,
}

/// Shared cache of resolved strings keyed by (culture, key)
#[derive(Debug, Clone)]
pub struct LocalizationCache {
    cache: Cache<CacheKey, String>,
    metrics: Arc<CacheMetrics>,
}

impl LocalizationCache {
    /// Create a cache with the given policy
    pub fn new(policy: CachePolicy) -> Self {
        let mut builder = Cache::<CacheKey, String>::builder();
        if let Some(capacity) = policy.max_capacity {
            builder = builder.max_capacity(capacity);
        }
        if let Some(ttl) = policy.time_to_live {
            builder = builder.time_to_live(ttl);
        }
        if let Some(tti) = policy.time_to_idle {
            builder = builder.time_to_idle(tti);
        }

        info!(
            max_capacity = ?policy.max_capacity,
            time_to_live = ?policy.time_to_live,
            time_to_idle = ?policy.time_to_idle,
            "Created localization cache"
        );

        Self {
            cache: builder.build(),
            metrics: Arc::new(CacheMetrics::default()),
        }
    }

    /// Cache whose entries live for the whole process
    pub fn unbounded() -> Self {
        Self::new(CachePolicy::default())
    }

    /// Return the cached text for (`culture`, `key`), or run `loader` on a
    /// miss. Only non-empty loader results are stored.
    #[instrument(skip(self, culture, loader), fields(culture = %culture))]
    pub async fn get_or_load<F, Fut>(&self, culture: &Culture, key: &str, loader: F) -> Option<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<String>>,
    {
        let cache_key = CacheKey::new(culture, key);

        if let Some(value) = self.cache.get(&cache_key).await {
            debug!("Cache hit for key: {}", cache_key);
            self.metrics.record_hit();
            return Some(value);
        }

        debug!("Cache miss for key: {}", cache_key);
        self.metrics.record_miss();

        let value = loader().await;
        if let Some(text) = value.as_deref().filter(|text| !text.is_empty()) {
            self.cache.insert(cache_key, text.to_string()).await;
            self.metrics.record_insert();
        }
        value
    }

    /// Cached text without loading
    pub async fn get(&self, culture: &Culture, key: &str) -> Option<String> {
        self.cache.get(&CacheKey::new(culture, key)).await
    }

    /// Drop every entry
    pub async fn invalidate_all(&self) {
        info!("Invalidating all localization cache entries");
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }

    /// Counter metrics
    pub fn metrics(&self) -> Arc<CacheMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Current statistics, after applying pending maintenance
    pub async fn stats(&self) -> CacheStats {
        self.cache.run_pending_tasks().await;
        CacheStats {
            hits: self.metrics.hits.load(Ordering::Relaxed),
            misses: self.metrics.misses.load(Ordering::Relaxed),
            inserts: self.metrics.inserts.load(Ordering::Relaxed),
            entries: self.cache.entry_count(),
            hit_rate: self.metrics.hit_rate(),
        }
    }
}

impl Default for LocalizationCache {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::AtomicUsize;

    fn culture(tag: &str) -> Culture {
        Culture::parse(tag).unwrap()
    }

    #[test]
    fn test_keys_do_not_collide_on_separators() {
        let a = CacheKey::new(&culture("en-US"), "a_b");
        let b = CacheKey::new(&culture("en-US"), "a");
        let c = CacheKey::new(&culture("pt-BR"), "a_b");

        let keys: HashSet<_> = [a.clone(), b, c].into_iter().collect();
        assert_eq!(keys.len(), 3);
        assert_eq!(a.to_string(), "locale_en-US_a_b");
        assert_eq!(a.key(), "a_b");
        assert_eq!(a.culture().name(), "en-US");
    }

    #[tokio::test]
    async fn test_hit_skips_loader() {
        let cache = LocalizationCache::unbounded();
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let en = culture("en-US");

        for _ in 0..3 {
            let value = cache
                .get_or_load(&en, "hi", move || async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Some("Hello!".to_string())
                })
                .await;
            assert_eq!(value.as_deref(), Some("Hello!"));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let stats = cache.stats().await;
        assert_eq!((stats.hits, stats.misses, stats.inserts), (2, 1, 1));
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn test_absence_and_empty_text_not_cached() {
        let cache = LocalizationCache::unbounded();
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let en = culture("en-US");

        for _ in 0..2 {
            let missing = cache
                .get_or_load(&en, "missing", move || async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    None
                })
                .await;
            assert_eq!(missing, None);

            let empty = cache
                .get_or_load(&en, "empty", move || async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Some(String::new())
                })
                .await;
            assert_eq!(empty.as_deref(), Some(""));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(cache.get(&en, "missing").await, None);
        assert_eq!(cache.get(&en, "empty").await, None);
    }

    #[tokio::test]
    async fn test_cultures_are_isolated() {
        let cache = LocalizationCache::unbounded();
        let en = culture("en-US");
        let pt = culture("pt-BR");

        cache
            .get_or_load(&en, "hi", || async { Some("Hello!".to_string()) })
            .await;
        let pt_value = cache
            .get_or_load(&pt, "hi", || async { Some("Olá!".to_string()) })
            .await;

        assert_eq!(pt_value.as_deref(), Some("Olá!"));
        assert_eq!(cache.get(&en, "hi").await.as_deref(), Some("Hello!"));
    }

    #[tokio::test]
    async fn test_invalidate_all() {
        let cache = LocalizationCache::new(CachePolicy {
            max_capacity: Some(10),
            ..CachePolicy::default()
        });
        let en = culture("en-US");
        cache
            .get_or_load(&en, "hi", || async { Some("Hello!".to_string()) })
            .await;

        cache.invalidate_all().await;

        assert_eq!(cache.get(&en, "hi").await, None);
        assert_eq!(cache.stats().await.entries, 0);
    }

    #[test]
    fn test_metrics_hit_rate() {
        let metrics = CacheMetrics::default();
        assert_eq!(metrics.hit_rate(), 0.0);

        metrics.record_hit();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_miss();
        metrics.record_insert();

        assert_eq!(metrics.hit_rate(), 0.75);
        assert_eq!(metrics.inserts.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_capacity_bound_is_enforced() {
        let cache = LocalizationCache::new(CachePolicy {
            max_capacity: Some(1),
            ..CachePolicy::default()
        });
        let en = culture("en-US");

        for key in ["hi", "welcome", "goodbye"] {
            cache
                .get_or_load(&en, key, move || async move { Some(format!("text for {key}")) })
                .await;
        }

        let stats = cache.stats().await;
        assert_eq!(stats.inserts, 3);
        assert!(stats.entries <= 1, "entries = {}", stats.entries);
    }

    #[tokio::test]
    async fn test_time_to_live_expires_entries() {
        let cache = LocalizationCache::new(CachePolicy {
            time_to_live: Some(Duration::from_millis(50)),
            ..CachePolicy::default()
        });
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let en = culture("en-US");
        let load = move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Some("Hello!".to_string())
        };

        cache.get_or_load(&en, "hi", load).await;
        assert_eq!(cache.get(&en, "hi").await.as_deref(), Some("Hello!"));

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(cache.get(&en, "hi").await, None);
        assert_eq!(cache.stats().await.entries, 0);

        cache.get_or_load(&en, "hi", load).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_policy_from_config() {
        let config = CacheConfig {
            max_capacity: Some(100),
            time_to_live_seconds: Some(30),
            time_to_idle_seconds: None,
        };
        let policy = CachePolicy::from(&config);
        assert_eq!(policy.max_capacity, Some(100));
        assert_eq!(policy.time_to_live, Some(Duration::from_secs(30)));
        assert_eq!(policy.time_to_idle, None);
    }
}
