//! Application-wide error types using thiserror.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jsonloc_common::JsonlocError;
use jsonloc_i18n::I18nError;
use tracing::{error, warn};

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] JsonlocError),

    /// Localization error.
    #[error("Localization error: {0}")]
    Localization(#[from] I18nError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the server application.
pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    /// HTTP status reported for this error
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Localization(I18nError::ResourceUnavailable { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Localization(I18nError::InvalidCulture(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected: {}", self);
        }

        let message = match &self {
            Self::Localization(I18nError::FormatMismatch { key, .. }) => {
                format!("Unable to format localized string '{key}'")
            }
            Self::Localization(I18nError::ResourceUnavailable { culture, .. }) => {
                format!("Localized resources for {culture} are unavailable")
            }
            Self::Localization(I18nError::InvalidCulture(culture)) => {
                format!("Invalid culture: {culture}")
            }
            _ => "Internal server error".to_string(),
        };
        (status, message).into_response()
    }
}
