use crate::error::api::ApiError;

use common::ErrorLocation;

use thiserror::Error as ThisError;

/// Error returned by every [`crate::ThemeClient`] operation.
#[derive(Debug, ThisError)]
pub enum ThemeClientError {
    /// Classified failure from the taxonomy, including path validation rejections.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A theme-scoped operation was invoked on a client without a theme id.
    #[error("Missing Theme Id Error: {operation} requires a theme id {location}")]
    MissingThemeId {
        operation: &'static str,
        location: ErrorLocation,
    },
}

impl ThemeClientError {
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ThemeClientError::Api(error) => Some(error),
            ThemeClientError::MissingThemeId { .. } => None,
        }
    }

    /// Stable `SDK::xxxx` code for API errors.
    pub fn code(&self) -> Option<&'static str> {
        self.api_error().map(ApiError::code)
    }
}
