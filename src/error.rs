//! Error types and handling for the `TripPlanner` service

use axum::http::StatusCode;
use thiserror::Error;

/// Main error type for the `TripPlanner` service
#[derive(Error, Debug)]
pub enum TripPlannerError {
    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Requested record does not exist
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Weather provider errors
    #[error("Weather error: {message}")]
    Weather { message: String },

    /// Trip API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Trip store errors
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TripPlannerError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new weather provider error
    pub fn weather<S: Into<String>>(message: S) -> Self {
        Self::Weather {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// HTTP status this error maps to
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            TripPlannerError::Validation { .. } => StatusCode::BAD_REQUEST,
            TripPlannerError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripPlannerError::Validation { message } | TripPlannerError::NotFound { message } => {
                message.clone()
            }
            TripPlannerError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TripPlannerError::Weather { .. } => "Weather data not available".to_string(),
            TripPlannerError::Api { .. } => {
                "Unable to reach the trip service. Please check the server URL.".to_string()
            }
            TripPlannerError::Storage { .. } | TripPlannerError::Io { .. } => {
                "Internal server error".to_string()
            }
        }
    }
}
