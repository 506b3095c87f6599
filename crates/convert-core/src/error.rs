//! Error types for the conversion client.
//!
//! Every error surfaces to the user as its `Display` text, so messages are kept
//! short and free of debug formatting.

use thiserror::Error;

/// Main error type for the conversion client.
#[derive(Debug, Error)]
pub enum ConvertError {
    // Network errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        /// Optional cause description
        cause: Option<String>,
    },

    /// The conversion service answered with a non-success HTTP status.
    ///
    /// Displays as the canonical status line (`401 Unauthorized`), followed by
    /// the service's `detail` text when one was returned.
    #[error("{}", http_message(.status, .detail.as_deref()))]
    Http { status: u16, detail: Option<String> },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    // Validation errors
    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Result type alias for conversion client operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

fn http_message(status: &u16, detail: Option<&str>) -> String {
    let status = *status;
    let line = match reqwest::StatusCode::from_u16(status) {
        Ok(code) => match code.canonical_reason() {
            Some(reason) => format!("{} {}", status, reason),
            None => status.to_string(),
        },
        Err(_) => status.to_string(),
    };
    match detail {
        Some(detail) if !detail.is_empty() => format!("{}: {}", line, detail),
        _ => line,
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for ConvertError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return ConvertError::Http {
                status: status.as_u16(),
                detail: None,
            };
        }
        ConvertError::Network {
            message: err.to_string(),
            cause: std::error::Error::source(&err).map(|s| s.to_string()),
        }
    }
}

impl From<url::ParseError> for ConvertError {
    fn from(err: url::ParseError) -> Self {
        ConvertError::Config {
            message: format!("invalid URL: {}", err),
        }
    }
}

impl ConvertError {
    /// Create a validation error for a missing required field.
    pub fn required(field: impl Into<String>) -> Self {
        ConvertError::Validation {
            field: field.into(),
            message: "is required".to_string(),
        }
    }

    /// Whether the service rejected the request's credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ConvertError::Http { status: 401 | 403, .. })
    }
}
