//! Client configuration: credentials, optional theme id and debug flag.
//!
//! Built in code with [`ClientConfig::builder`], read from a JSON file with
//! [`ClientConfig::load`], or taken from the environment (and an optional
//! `.env` file) with [`ClientConfig::from_env`]. Immutable once built.

use crate::API_BASE_URL;
use crate::error::ConfigError;

use common::{ErrorLocation, RedactedSecret};

use std::panic::Location;
use std::path::Path;
use std::time::Duration;

use log::{debug, info};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);

pub const ENV_KEY: &str = "OPENCODE_KEY";
pub const ENV_PASSWORD: &str = "OPENCODE_PASSWORD";
pub const ENV_THEME_ID: &str = "OPENCODE_THEME_ID";
pub const ENV_DEBUG: &str = "OPENCODE_DEBUG";
pub const ENV_BASE_URL: &str = "OPENCODE_BASE_URL";

// ============================================
// CONFIG
// ============================================

#[derive(Debug, Clone)]
pub struct ClientConfig {
    key: String,
    password: RedactedSecret,
    theme_id: Option<u64>,
    debug: bool,
    base_url: String,
    timeout: Duration,
}

/// On-disk shape read by [`ClientConfig::load`].
#[derive(Debug, Deserialize)]
struct ConfigFile {
    key: String,
    password: String,
    #[serde(
        default,
        deserialize_with = "models::de::optional_u64_from_string_or_number"
    )]
    theme_id: Option<u64>,
    #[serde(default)]
    debug: bool,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn password(&self) -> &RedactedSecret {
        &self.password
    }

    pub fn theme_id(&self) -> Option<u64> {
        self.theme_id
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `Token token=<key>_<password>`
    pub fn authorization_header(&self) -> RedactedSecret {
        RedactedSecret::new(format!(
            "Token token={}_{}",
            self.key,
            self.password.expose()
        ))
    }

    /// Load config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is not valid JSON,
    /// or holds invalid values.
    #[track_caller]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: ConfigFile =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let mut builder = Self::builder()
            .with_key(file.key)
            .with_password(file.password)
            .with_debug(file.debug);
        if let Some(theme_id) = file.theme_id {
            builder = builder.with_theme_id(theme_id);
        }
        if let Some(base_url) = file.base_url {
            builder = builder.with_base_url(base_url);
        }
        if let Some(secs) = file.timeout_secs {
            builder = builder.with_timeout(Duration::from_secs(secs));
        }

        let config = builder.build()?;
        info!("Client config loaded from {}", path.display());
        Ok(config)
    }

    /// Read config from `OPENCODE_*` environment variables.
    ///
    /// A `.env` file in the working directory is loaded first when present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or a value
    /// does not parse.
    #[track_caller]
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) => debug!("No .env file loaded: {e}"),
        }

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    #[track_caller]
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| ConfigError::EnvError {
                location: ErrorLocation::from(Location::caller()),
                variable: name.to_string(),
                reason: String::from("not set"),
            })
        };

        let mut builder = Self::builder()
            .with_key(required(ENV_KEY)?)
            .with_password(required(ENV_PASSWORD)?);

        if let Some(raw) = lookup(ENV_THEME_ID).filter(|value| !value.trim().is_empty()) {
            let theme_id = raw.trim().parse::<u64>().map_err(|e| ConfigError::EnvError {
                location: ErrorLocation::from(Location::caller()),
                variable: ENV_THEME_ID.to_string(),
                reason: format!("'{raw}' is not a theme id: {e}"),
            })?;
            builder = builder.with_theme_id(theme_id);
        }

        if let Some(raw) = lookup(ENV_DEBUG) {
            builder = builder.with_debug(parse_flag(&raw));
        }

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            builder = builder.with_base_url(base_url);
        }

        builder.build()
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ============================================
// BUILDER
// ============================================

/// Builder for validated [`ClientConfig`] instances.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    key: Option<String>,
    password: Option<RedactedSecret>,
    theme_id: Option<u64>,
    debug: bool,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(RedactedSecret::new(password));
        self
    }

    pub fn with_theme_id(mut self, theme_id: u64) -> Self {
        self.theme_id = Some(theme_id);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the config with validation.
    #[track_caller]
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let key = self
            .key
            .ok_or_else(|| ConfigError::validation("Key is required"))?;
        if key.trim().is_empty() {
            return Err(ConfigError::validation("Key cannot be empty"));
        }

        let password = self
            .password
            .ok_or_else(|| ConfigError::validation("Password is required"))?;
        if password.expose().trim().is_empty() {
            return Err(ConfigError::validation("Password cannot be empty"));
        }

        if self.theme_id == Some(0) {
            return Err(ConfigError::validation("Theme id must be non-zero"));
        }

        let base_url = self
            .base_url
            .unwrap_or_else(|| API_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::validation(format!(
                "Invalid base URL format: {base_url}"
            )));
        }
        Url::parse(&base_url)?;

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT_DURATION);
        if timeout.is_zero() {
            return Err(ConfigError::validation("Timeout must be non-zero"));
        }

        Ok(ClientConfig {
            key,
            password,
            theme_id: self.theme_id,
            debug: self.debug,
            base_url,
            timeout,
        })
    }
}
