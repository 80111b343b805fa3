//! Client library for managing storefront themes and their assets.
//!
//! Requests go out through a [`transport::Transport`]; failed calls are turned
//! into a closed set of typed errors by [`classifier`], and asset writes are
//! checked by [`path_validator`] before any network access.

pub mod classifier;
pub mod config;
pub mod content;
pub mod debug_log;
pub mod error;
pub mod path_validator;
pub mod transport;

mod theme_client;
#[cfg(test)]
mod tests;

pub use config::{ClientConfig, ClientConfigBuilder};
pub use debug_log::{DebugLog, FileDebugLog, NoopDebugLog, Severity};
pub use error::{ApiError, ApiErrorKind, ThemeClientError};
pub use theme_client::ThemeClient;
pub use transport::{ReqwestTransport, Transport};

pub const API_HOSTNAME: &str = "opencode.tray.com.br";
pub const API_BASE_URL: &str = const_format::concatcp!("https://", API_HOSTNAME, "/api/");

/// Client version sent as the `gem_version` query parameter on every request.
pub const GEM_VERSION: &str = "1.0.4";
