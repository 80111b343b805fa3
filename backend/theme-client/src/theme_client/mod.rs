use crate::GEM_VERSION;
use crate::classifier::{self, Classification, FailedCall, Operation};
use crate::config::ClientConfig;
use crate::content;
use crate::debug_log::{DebugLog, FileDebugLog, NoopDebugLog, Severity};
use crate::error::{ApiError, ConfigError, ThemeClientError};
use crate::path_validator::validate_asset_path;
use crate::transport::{HttpMethod, ReqwestTransport, RequestDescriptor, Transport};

use common::{ErrorLocation, RedactedSecret};
use models::{AssetContent, AssetList, ConfigurationStatus, CreatedTheme, ThemeList};

use std::panic::Location;
use std::sync::Arc;

use log::{debug, info, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

const GEM_VERSION_PARAM: &str = "gem_version";
const THEME_ID_PARAM: &str = "theme_id";
const ASSET_KEY_PARAM: &str = "key";

const CHECK_ENDPOINT: &str = "check";
const LIST_ENDPOINT: &str = "list";
const THEMES_ENDPOINT: &str = "themes";
const CLEAN_CACHE_ENDPOINT: &str = "clean_cache/";

const DEFAULT_THEME_BASE: &str = "default";

/// Asset body as returned by the backend.
///
/// Content may arrive under any of three keys, sometimes alongside a null
/// sibling, so each key is its own field.
#[derive(Debug, Deserialize)]
struct AssetPayload {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    dynamic: Option<bool>,
    #[serde(default)]
    dynamic_file: Option<bool>,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    attachment: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    public_url: Option<String>,
}

impl AssetPayload {
    fn is_dynamic(&self) -> bool {
        self.dynamic.or(self.dynamic_file).unwrap_or(false)
    }

    fn into_encoded_content(self) -> Option<String> {
        self.value.or(self.attachment).or(self.content)
    }
}

/// What a completed call produced.
enum Response {
    Body(Option<Value>),
    /// A backend failure the operation treats as success.
    AlreadyDone,
}

/// Theme and asset operations against the storefront API.
///
/// Every call is an independent round-trip; the client holds only immutable
/// configuration and may be shared across tasks.
pub struct ThemeClient<T: Transport = ReqwestTransport> {
    config: ClientConfig,
    authorization: RedactedSecret,
    transport: T,
    debug_log: Arc<dyn DebugLog>,
}

impl ThemeClient<ReqwestTransport> {
    /// Create a client using reqwest.
    ///
    /// When `config.debug()` is set, records go to the file log in the working
    /// directory; otherwise they are discarded.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let transport = ReqwestTransport::new(config.base_url(), config.timeout())?;
        let debug_log: Arc<dyn DebugLog> = if config.debug() {
            Arc::new(FileDebugLog::in_working_directory())
        } else {
            Arc::new(NoopDebugLog)
        };

        Ok(Self::with_transport(config, transport, debug_log))
    }
}

impl<T: Transport> ThemeClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T, debug_log: Arc<dyn DebugLog>) -> Self {
        let authorization = config.authorization_header();
        Self {
            config,
            authorization,
            transport,
            debug_log,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Verify credentials and, when configured, the theme id.
    pub async fn check_configuration(&self) -> Result<ConfigurationStatus, ThemeClientError> {
        let mut request = self.request(HttpMethod::Post, CHECK_ENDPOINT);
        if let Some(theme_id) = self.config.theme_id() {
            request = request.with_query(THEME_ID_PARAM, theme_id.to_string());
        }

        self.fetch(Operation::CheckConfiguration, request).await
    }

    pub async fn list_themes(&self) -> Result<ThemeList, ThemeClientError> {
        let request = self.request(HttpMethod::Get, LIST_ENDPOINT);
        self.fetch(Operation::ListThemes, request).await
    }

    /// Create a theme named `name`, copied from `base` (`"default"` when `None`).
    pub async fn create_theme(
        &self,
        name: &str,
        base: Option<&str>,
    ) -> Result<CreatedTheme, ThemeClientError> {
        let body = json!({
            "theme": {
                "name": name,
                "theme_base": base.unwrap_or(DEFAULT_THEME_BASE),
                "gem_version": GEM_VERSION,
            }
        });
        let request = self
            .request(HttpMethod::Post, THEMES_ENDPOINT)
            .with_body(body);

        self.fetch(Operation::CreateTheme, request).await
    }

    /// Delete a theme. A theme the backend can no longer resolve counts as deleted.
    pub async fn delete_theme(&self, theme_id: u64) -> Result<bool, ThemeClientError> {
        let request = self.request(HttpMethod::Delete, format!("{THEMES_ENDPOINT}/{theme_id}"));
        self.execute(Operation::DeleteTheme, request).await?;
        Ok(true)
    }

    /// Invalidate cached renders for `theme_id`, or for the configured theme.
    ///
    /// # Errors
    ///
    /// Besides transport failures, a success response whose nested
    /// `response.code` is [`classifier::CLEAN_CACHE_FAILURE_CODE`] is reported
    /// as an unknown error.
    pub async fn clean_cache(&self, theme_id: Option<u64>) -> Result<bool, ThemeClientError> {
        let theme_id = match theme_id {
            Some(theme_id) => theme_id,
            None => self.require_theme_id(Operation::CleanCache)?,
        };

        let request = RequestDescriptor::new(HttpMethod::Post, CLEAN_CACHE_ENDPOINT)
            .with_query(THEME_ID_PARAM, theme_id.to_string())
            .with_query(GEM_VERSION_PARAM, GEM_VERSION);

        let body = self.expect_body(Operation::CleanCache, request).await?;
        classifier::check_clean_cache_body(body.as_ref())?;

        Ok(true)
    }

    pub async fn list_assets(&self) -> Result<AssetList, ThemeClientError> {
        let theme_id = self.require_theme_id(Operation::ListAssets)?;
        let request = self.request(HttpMethod::Get, assets_path(theme_id));

        self.fetch(Operation::ListAssets, request).await
    }

    /// Download one asset. `path` may omit the leading separator.
    pub async fn get_asset(&self, path: &str) -> Result<AssetContent, ThemeClientError> {
        let theme_id = self.require_theme_id(Operation::GetAsset)?;
        let key = asset_key(path);

        let request = self
            .request(HttpMethod::Get, assets_path(theme_id))
            .with_query(ASSET_KEY_PARAM, key.as_str());

        let payload: AssetPayload = self.fetch(Operation::GetAsset, request).await?;

        let dynamic = payload.is_dynamic();
        let returned_key = payload.key.clone();
        let public_url = payload.public_url.clone();

        let encoded = payload.into_encoded_content().ok_or_else(|| {
            ApiError::unknown().with_details(format!("No content returned for {key}"))
        })?;
        let bytes = content::decode(&encoded).map_err(|e| {
            ApiError::unknown().with_details(format!("Invalid base64 content for {key}: {e}"))
        })?;

        Ok(AssetContent {
            key: returned_key.unwrap_or(key),
            dynamic,
            binary: content::is_binary(&bytes),
            content: bytes,
            public_url,
        })
    }

    /// Upload `bytes` to `path`.
    ///
    /// The path is validated before any request is made. Binary content is
    /// sent under `attachment`, text under `value`, both base64 encoded.
    pub async fn send_asset(&self, path: &str, bytes: &[u8]) -> Result<bool, ThemeClientError> {
        let theme_id = self.require_theme_id(Operation::SendAsset)?;
        let key = asset_key(path);
        validate_asset_path(&key)?;

        let mut body = serde_json::Map::new();
        body.insert(ASSET_KEY_PARAM.to_string(), Value::String(key));
        body.insert(
            content::content_key(bytes).to_string(),
            Value::String(content::encode(bytes)),
        );

        let request = self
            .request(HttpMethod::Put, assets_path(theme_id))
            .with_body(Value::Object(body));

        self.execute(Operation::SendAsset, request).await?;
        Ok(true)
    }

    /// Remove the asset at `path`. The path is validated before any request is made.
    pub async fn delete_asset(&self, path: &str) -> Result<bool, ThemeClientError> {
        let theme_id = self.require_theme_id(Operation::DeleteAsset)?;
        let key = asset_key(path);
        validate_asset_path(&key)?;

        let request = self
            .request(HttpMethod::Delete, assets_path(theme_id))
            .with_query(ASSET_KEY_PARAM, key);

        self.execute(Operation::DeleteAsset, request).await?;
        Ok(true)
    }

    // ============================================
    // PLUMBING
    // ============================================

    fn request(&self, method: HttpMethod, path: impl Into<String>) -> RequestDescriptor {
        RequestDescriptor::new(method, path).with_query(GEM_VERSION_PARAM, GEM_VERSION)
    }

    #[track_caller]
    fn require_theme_id(&self, operation: Operation) -> Result<u64, ThemeClientError> {
        self.config
            .theme_id()
            .ok_or_else(|| ThemeClientError::MissingThemeId {
                operation: operation.name(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    async fn fetch<R: DeserializeOwned>(
        &self,
        operation: Operation,
        request: RequestDescriptor,
    ) -> Result<R, ThemeClientError> {
        let body = self
            .expect_body(operation, request)
            .await?
            .ok_or_else(|| ApiError::unknown().with_details(format!("{operation}: empty response body")))?;

        let decoded = serde_json::from_value(body).map_err(|e| {
            warn!("{operation}: could not decode response: {e}");
            ApiError::unknown().with_details(format!("{operation}: {e}"))
        })?;

        Ok(decoded)
    }

    async fn expect_body(
        &self,
        operation: Operation,
        request: RequestDescriptor,
    ) -> Result<Option<Value>, ApiError> {
        match self.execute(operation, request).await? {
            Response::Body(body) => Ok(body),
            Response::AlreadyDone => Err(ApiError::unknown()
                .with_details(format!("{operation}: unexpected reclassified response"))),
        }
    }

    async fn execute(
        &self,
        operation: Operation,
        request: RequestDescriptor,
    ) -> Result<Response, ApiError> {
        debug!("{operation}: {:?} {}", request.method, request.path);
        self.record(
            Severity::Info,
            operation,
            &serde_json::to_value(&request).unwrap_or_default(),
        );

        let failed = match self.transport.send(&request, &self.authorization).await {
            Ok(response) if response.status.is_success() => {
                info!("{operation}: HTTP {}", response.status);
                if let Some(body) = &response.body {
                    self.record(Severity::Info, operation, body);
                }
                return Ok(Response::Body(response.body));
            }
            Ok(response) => FailedCall::Response {
                status: response.status,
                body: response.body,
            },
            Err(e) => {
                warn!("{operation}: transport failure: {e}");
                FailedCall::Transport {
                    message: e.details(),
                }
            }
        };

        self.record(Severity::Error, operation, &failure_payload(&failed));

        match classifier::classify(operation, &failed) {
            Classification::ReclassifiedSuccess => {
                info!("{operation}: backend failure treated as success");
                Ok(Response::AlreadyDone)
            }
            Classification::Failure(error) => {
                warn!("{operation}: {} {}", error.code(), error.message());
                Err(error)
            }
        }
    }

    fn record(&self, severity: Severity, operation: Operation, payload: &Value) {
        self.debug_log.record(severity, operation.name(), payload);
    }
}

/// Rooted asset key: `css/theme.css` becomes `/css/theme.css`.
pub(crate) fn asset_key(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

fn assets_path(theme_id: u64) -> String {
    format!("{THEMES_ENDPOINT}/{theme_id}/assets")
}

fn failure_payload(failed: &FailedCall) -> Value {
    match failed {
        FailedCall::Response { status, body } => json!({
            "status": status.0,
            "body": body,
        }),
        FailedCall::Transport { message } => Value::String(message.clone()),
    }
}
