//! Result models for the theme client.
//!
//! This crate contains pure data structures returned by the client
//! operations. Models have no business logic - they're just data that
//! can be passed between layers.
//!
//! ## Architecture
//!
//! - **common**: Shared value types (error location, secrets, status codes)
//! - **models** (this crate): Pure data structures
//! - **theme-client**: Classification, validation and the operation façade
//!
//! Backend payloads use snake_case keys, so serde renames on the fields
//! below are the only key mapping required.

pub mod asset;
pub mod configuration;
pub mod de;
pub mod theme;

pub use asset::{AssetContent, AssetList, ThemeAsset};
pub use configuration::ConfigurationStatus;
pub use theme::{CreatedTheme, ThemeList, ThemeSummary};
