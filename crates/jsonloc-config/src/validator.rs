//! Runtime validation of a loaded configuration.

use crate::schema::Config;
use std::collections::HashSet;
use unic_langid::LanguageIdentifier;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, collecting every problem found.
    pub fn validate(config: &Config) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();
        let localization = &config.localization;

        if localization.extension.trim().is_empty() {
            problems.push("localization.extension cannot be empty".to_string());
        }

        if localization.supported_cultures.is_empty() {
            problems.push("localization.supported_cultures cannot be empty".to_string());
        }

        let mut seen = HashSet::new();
        for culture in &localization.supported_cultures {
            match parse_tag(culture) {
                Some(tag) => {
                    if !seen.insert(tag.clone()) {
                        problems.push(format!("duplicate supported culture '{culture}'"));
                    }
                }
                None => problems.push(format!("invalid supported culture '{culture}'")),
            }
        }

        match parse_tag(&localization.default_culture) {
            Some(tag) if !seen.contains(&tag) => problems.push(format!(
                "default culture '{}' is not listed in supported_cultures",
                localization.default_culture
            )),
            Some(_) => {}
            None => problems.push(format!(
                "invalid default culture '{}'",
                localization.default_culture
            )),
        }

        let cache = &config.cache;
        if cache.max_capacity == Some(0) {
            problems.push("cache.max_capacity must be greater than zero".to_string());
        }
        if cache.time_to_live_seconds == Some(0) {
            problems.push("cache.time_to_live_seconds must be greater than zero".to_string());
        }
        if cache.time_to_idle_seconds == Some(0) {
            problems.push("cache.time_to_idle_seconds must be greater than zero".to_string());
        }

        if config.server.bind_address.trim().is_empty() {
            problems.push("server.bind_address cannot be empty".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

/// Canonical culture tag, or `None` for anything that is not `language-REGION`.
fn parse_tag(value: &str) -> Option<String> {
    let tag: LanguageIdentifier = value.trim().parse().ok()?;
    tag.region?;
    Some(tag.to_string())
}
