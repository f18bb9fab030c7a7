//! Culture identifiers and the set of cultures a deployment accepts

use crate::error::{I18nError, I18nResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// A language/region pair such as `en-US`.
///
/// Tags are canonicalised on parse, so `EN-us`, `en_us` and `en-US` are the
/// same culture.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Culture {
    id: LanguageIdentifier,
    name: String,
}

impl Culture {
    /// Parse a culture tag. Language-only or malformed tags are rejected.
    pub fn parse(tag: &str) -> I18nResult<Self> {
        let trimmed = tag.trim();
        let id: LanguageIdentifier = trimmed
            .parse()
            .map_err(|_| I18nError::InvalidCulture(trimmed.to_string()))?;

        if id.region.is_none() {
            return Err(I18nError::InvalidCulture(trimmed.to_string()));
        }

        let name = id.to_string();
        Ok(Self { id, name })
    }

    /// Canonical name, e.g. `pt-BR`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Language subtag, e.g. `pt`
    pub fn language(&self) -> &str {
        self.id.language.as_str()
    }

    /// Region subtag, e.g. `BR`
    pub fn region(&self) -> Option<&str> {
        self.id.region.as_ref().map(|region| region.as_str())
    }

    /// Underlying language identifier
    pub fn language_identifier(&self) -> &LanguageIdentifier {
        &self.id
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for Culture {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Culture {
    type Error = I18nError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Culture> for String {
    fn from(culture: Culture) -> Self {
        culture.name
    }
}

/// Ordered, duplicate-free set of cultures a request may select.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownCultures {
    cultures: Vec<Culture>,
}

impl KnownCultures {
    /// Build from already-parsed cultures; later duplicates are dropped.
    pub fn new<I>(cultures: I) -> Self
    where
        I: IntoIterator<Item = Culture>,
    {
        let mut known = Self::default();
        for culture in cultures {
            if !known.contains(&culture) {
                known.cultures.push(culture);
            }
        }
        known
    }

    /// Parse every tag, failing on the first invalid one.
    pub fn from_tags<I, S>(tags: I) -> I18nResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cultures = tags
            .into_iter()
            .map(|tag| Culture::parse(tag.as_ref()))
            .collect::<I18nResult<Vec<_>>>()?;
        Ok(Self::new(cultures))
    }

    /// The known culture equal to `candidate`, if any.
    pub fn find(&self, candidate: &Culture) -> Option<&Culture> {
        self.cultures.iter().find(|known| *known == candidate)
    }

    /// Whether `culture` is known.
    pub fn contains(&self, culture: &Culture) -> bool {
        self.find(culture).is_some()
    }

    /// Known cultures in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &Culture> {
        self.cultures.iter()
    }

    /// Number of known cultures.
    pub fn len(&self) -> usize {
        self.cultures.len()
    }

    /// Whether no culture is known.
    pub fn is_empty(&self) -> bool {
        self.cultures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonicalises() {
        let culture = Culture::parse("EN-us").unwrap();
        assert_eq!(culture.name(), "en-US");
        assert_eq!(culture.language(), "en");
        assert_eq!(culture.region(), Some("US"));
        assert_eq!(culture, Culture::parse("en_US").unwrap());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            Culture::parse("pt"),
            Err(I18nError::InvalidCulture(tag)) if tag == "pt"
        ));
        assert!(Culture::parse("").is_err());
        assert!(Culture::parse("not-a-culture-at-all!").is_err());
        assert!(Culture::parse("en-US;q=0.5").is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let culture: Culture = serde_json::from_str("\"pt-br\"").unwrap();
        assert_eq!(culture.name(), "pt-BR");
        assert_eq!(serde_json::to_string(&culture).unwrap(), "\"pt-BR\"");
        assert!(serde_json::from_str::<Culture>("\"zz\"").is_err());
    }

    #[test]
    fn test_known_cultures_dedup_and_find() {
        let known = KnownCultures::from_tags(["pt-BR", "en-US", "EN-us"]).unwrap();
        assert_eq!(known.len(), 2);
        let found = known.find(&Culture::parse("pt-br").unwrap()).unwrap();
        assert_eq!(found.name(), "pt-BR");
        assert!(!known.contains(&Culture::parse("fr-FR").unwrap()));
    }

    #[test]
    fn test_known_cultures_invalid_tag() {
        assert!(KnownCultures::from_tags(["en-US", "english"]).is_err());
    }
}
