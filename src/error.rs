//! Error types and handling for the `FloodWatch` service

use axum::http::StatusCode;
use thiserror::Error;

/// Main error type for the `FloodWatch` service
#[derive(Error, Debug)]
pub enum FloodWatchError {
    /// A required request parameter is missing or empty
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The place name resolved to zero locations
    #[error("Location not found: {name}")]
    NotFound { name: String },

    /// An external provider failed, timed out or returned garbage
    #[error("{provider} API error: {message}")]
    Upstream {
        provider: &'static str,
        message: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl FloodWatchError {
    /// Create a new invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new not-found error for a place name
    pub fn not_found<S: Into<String>>(name: S) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create a new upstream error for the named provider
    pub fn upstream<S: Into<String>>(provider: &'static str, message: S) -> Self {
        Self::Upstream {
            provider,
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status the boundary answers with
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            FloodWatchError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            FloodWatchError::NotFound { .. } => StatusCode::NOT_FOUND,
            FloodWatchError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            FloodWatchError::Config { .. } | FloodWatchError::Io { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            FloodWatchError::InvalidInput { message } => message.clone(),
            FloodWatchError::NotFound { .. } => "Location not found".to_string(),
            FloodWatchError::Upstream { provider, .. } => format!("{provider} API error"),
            FloodWatchError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            FloodWatchError::Io { .. } => "File operation failed.".to_string(),
        }
    }
}
