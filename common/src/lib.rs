//! Shared value types for the theme client workspace.
//!
//! Everything here is free of I/O and business rules:
//!
//! - [`ErrorLocation`]: call-site capture attached to every error variant
//! - [`HttpStatusCode`]: raw status stored as a number, never parsed from text
//! - [`RedactedSecret`]: credential wrapper that never prints or serializes its value

pub mod error;
pub mod http_status;
pub mod redacted_secret;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_secret::RedactedSecret;

#[cfg(test)]
mod tests;
