//! Per-request culture context
//!
//! The culture chosen for a request travels with that request as a plain
//! value. Nothing here is shared between requests, so concurrent requests with
//! different language preferences cannot observe each other's choice.

use crate::culture::Culture;
use serde::Serialize;

/// How the active culture of a request was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CultureSource {
    /// The request named a known culture
    Requested,
    /// The request named nothing usable; the default applies
    Default,
}

impl CultureSource {
    /// String form used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Default => "default",
        }
    }
}

/// Active culture of one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestCulture {
    culture: Culture,
    source: CultureSource,
}

impl RequestCulture {
    /// Culture explicitly selected by the request
    pub fn requested(culture: Culture) -> Self {
        Self {
            culture,
            source: CultureSource::Requested,
        }
    }

    /// Culture that applies because the request selected nothing usable
    pub fn fallback(culture: Culture) -> Self {
        Self {
            culture,
            source: CultureSource::Default,
        }
    }

    /// The active culture
    pub fn culture(&self) -> &Culture {
        &self.culture
    }

    /// How the culture was chosen
    pub fn source(&self) -> CultureSource {
        self.source
    }

    /// Whether the default culture applies
    pub fn is_fallback(&self) -> bool {
        self.source == CultureSource::Default
    }

    /// Consume the context, keeping the culture
    pub fn into_culture(self) -> Culture {
        self.culture
    }
}
