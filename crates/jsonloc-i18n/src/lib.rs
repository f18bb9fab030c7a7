//! # jsonloc I18n
//!
//! Localized string resolution backed by per-culture JSON resource files.
//!
//! This crate negotiates the active culture of a request, loads and memoizes
//! culture resources, and serves lookups through a cache-aside layer. Missing
//! keys fall back to the key itself, so callers never receive empty text.
//!
//! ```no_run
//! use jsonloc_config::Config;
//! use jsonloc_i18n::LocalizationEngine;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = LocalizationEngine::from_config(&Config::default())?;
//! let request = engine.resolve(Some("pt-BR,en;q=0.8"));
//! let localizer = engine.localizer_for(&request);
//!
//! let greeting = localizer.get_formatted("welcome", &["Ana"]).await?;
//! println!("{greeting}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod context;
pub mod culture;
pub mod engine;
pub mod error;
pub mod format;
pub mod resolver;
pub mod resource;

pub use cache::{CacheKey, CacheMetrics, CachePolicy, CacheStats, LocalizationCache};
pub use context::{CultureSource, RequestCulture};
pub use culture::{Culture, KnownCultures};
pub use engine::{LocalizationEngine, LocalizedValue, StringLocalizer};
pub use error::{I18nError, I18nResult};
pub use format::{format_positional, FormatError};
pub use resolver::{parse_accept_language, resolve, CultureResolver, LanguageRange};
pub use resource::{JsonResourceStore, ResourceMap, ResourceStore};
