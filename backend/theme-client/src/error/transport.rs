//! Failures of the transport collaborator itself (no HTTP response to classify).

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum TransportError {
    #[error("Network Error: {message} {location}")]
    Network {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },
}

impl TransportError {
    pub fn message(&self) -> &str {
        match self {
            TransportError::Network { message, .. } => message,
            TransportError::UrlParse { message, .. } => message,
        }
    }

    /// Message prefixed with the failure category, when one is known.
    pub fn details(&self) -> String {
        match self {
            TransportError::Network {
                message,
                is_timeout: true,
                ..
            } => format!("Request timed out: {message}"),
            TransportError::Network {
                message,
                is_connection: true,
                ..
            } => format!("Connection failed: {message}"),
            other => other.message().to_string(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        // Check for specific error types BEFORE converting to string
        let is_timeout = error.is_timeout();
        let is_connection = error.is_connect();

        TransportError::Network {
            message: error.to_string(),
            is_timeout,
            is_connection,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<url::ParseError> for TransportError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        TransportError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
