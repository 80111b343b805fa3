pub mod api;
pub mod client;
pub mod config;
pub mod transport;

pub use api::{ApiError, ApiErrorKind};
pub use client::ThemeClientError;
pub use config::ConfigError;
pub use transport::TransportError;
