//! Domain-specific error types for fixture-app

use thiserror::Error;

/// Main error type for the fixture application
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("HTTP error: {message}")]
    Http { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<anyhow::Error> for FixtureError {
    fn from(err: anyhow::Error) -> Self {
        FixtureError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for FixtureError {
    fn from(err: serde_json::Error) -> Self {
        FixtureError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for FixtureError {
    fn from(err: reqwest::Error) -> Self {
        FixtureError::Http {
            message: format!("HTTP request failed: {}", err),
        }
    }
}

impl From<toml::de::Error> for FixtureError {
    fn from(err: toml::de::Error) -> Self {
        FixtureError::Config {
            message: format!("Invalid TOML: {}", err),
        }
    }
}

impl From<std::io::Error> for FixtureError {
    fn from(err: std::io::Error) -> Self {
        FixtureError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type alias for fixture operations
pub type Result<T> = std::result::Result<T, FixtureError>;
