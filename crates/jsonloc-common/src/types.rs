//! Common type definitions shared across the workspace.

/// Common result type for the application.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Application-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum JsonlocError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl JsonlocError {
    /// Creates a configuration error from anything printable.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = JsonlocError::config("default culture missing");
        assert_eq!(err.to_string(), "Configuration error: default culture missing");
    }

    #[test]
    fn test_boxed_result() {
        fn fails() -> Result<()> {
            Err(JsonlocError::config("bind address missing").into())
        }
        let err = fails().unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: bind address missing");
    }
}
