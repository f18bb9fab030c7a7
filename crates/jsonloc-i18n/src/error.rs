//! Error types for localization operations

use crate::format::FormatError;
use thiserror::Error;

/// Errors that can occur during localization operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// A culture tag could not be parsed into language and region
    #[error("Invalid culture identifier: {0}")]
    InvalidCulture(String),

    /// The resource backing a culture is missing or unparsable
    #[error("Resource for culture {culture} is unavailable ({path}): {reason}")]
    ResourceUnavailable {
        /// Culture whose resource was requested
        culture: String,
        /// Location the resource was expected at
        path: String,
        /// What went wrong
        reason: String,
    },

    /// Arguments do not fit the resolved template
    #[error("Failed to format message '{key}': {source}")]
    FormatMismatch {
        /// Key of the template
        key: String,
        /// Formatter failure
        #[source]
        source: FormatError,
    },
}

/// Result type for localization operations
pub type I18nResult<T> = Result<T, I18nError>;
