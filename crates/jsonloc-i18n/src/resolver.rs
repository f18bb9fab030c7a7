//! Culture negotiation from a request's language preference

use crate::context::RequestCulture;
use crate::culture::{Culture, KnownCultures};
use jsonloc_common::loggable_header;
use tracing::debug;

/// One entry of an `Accept-Language` list
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRange {
    /// Tag as written, e.g. `pt-BR`
    pub tag: String,
    /// Quality weight in `(0, 1]`
    pub quality: f32,
}

/// Parse an `Accept-Language` value into ranges ordered by descending weight.
///
/// Ranges with an invalid or zero weight and the `*` wildcard are dropped.
/// Ranges of equal weight keep their written order.
pub fn parse_accept_language(value: &str) -> Vec<LanguageRange> {
    let mut ranges: Vec<LanguageRange> = value
        .split(',')
        .filter_map(|part| {
            let mut components = part.split(';');
            let tag = components.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }

            let mut quality = 1.0_f32;
            for param in components {
                let param = param.trim();
                let weight = param
                    .strip_prefix("q=")
                    .or_else(|| param.strip_prefix("Q="));
                if let Some(weight) = weight {
                    quality = weight.trim().parse().ok()?;
                }
            }

            if !(quality > 0.0 && quality <= 1.0) {
                return None;
            }

            Some(LanguageRange {
                tag: tag.to_string(),
                quality,
            })
        })
        .collect();

    ranges.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    ranges
}

/// Select the active culture for a request.
///
/// An absent or blank preference yields `default`. A preference naming a
/// known culture (compared case-insensitively) yields that culture. A full
/// `Accept-Language` list is tried range by range, best weight first.
/// Anything else, including malformed tags, yields `default`.
pub fn resolve(requested: Option<&str>, default: &Culture, known: &KnownCultures) -> Culture {
    negotiate(requested, known).unwrap_or_else(|| default.clone())
}

/// The known culture a preference selects, if any
fn negotiate(requested: Option<&str>, known: &KnownCultures) -> Option<Culture> {
    let raw = requested.map(str::trim).filter(|raw| !raw.is_empty())?;

    if let Some(culture) = match_known(raw, known) {
        return Some(culture);
    }

    if raw.contains([',', ';']) {
        if let Some(culture) = parse_accept_language(raw)
            .iter()
            .find_map(|range| match_known(&range.tag, known))
        {
            return Some(culture);
        }
    }

    debug!(
        requested = %loggable_header(raw),
        "Requested culture is not supported"
    );
    None
}

fn match_known(tag: &str, known: &KnownCultures) -> Option<Culture> {
    let candidate = Culture::parse(tag).ok()?;
    known.find(&candidate).cloned()
}

/// Resolver bound to a deployment's default and known cultures
#[derive(Debug, Clone)]
pub struct CultureResolver {
    default: Culture,
    known: KnownCultures,
}

impl CultureResolver {
    /// Create a resolver
    pub fn new(default: Culture, known: KnownCultures) -> Self {
        Self { default, known }
    }

    /// Select the active culture for `requested`; see [`resolve`]
    pub fn resolve(&self, requested: Option<&str>) -> Culture {
        resolve(requested, &self.default, &self.known)
    }

    /// Like [`CultureResolver::resolve`], also recording whether the default applied
    pub fn resolve_request(&self, requested: Option<&str>) -> RequestCulture {
        match negotiate(requested, &self.known) {
            Some(culture) => RequestCulture::requested(culture),
            None => RequestCulture::fallback(self.default.clone()),
        }
    }

    /// The default culture
    pub fn default_culture(&self) -> &Culture {
        &self.default
    }

    /// The known cultures
    pub fn known_cultures(&self) -> &KnownCultures {
        &self.known
    }
}
