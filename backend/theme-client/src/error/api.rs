//! Closed taxonomy of errors reported to callers of the theme client.
//!
//! Callers tell errors apart by [`ApiErrorKind`] (or its stable `code()`),
//! never by message text: backend messages vary and carry encoding artifacts.

use common::ErrorLocation;

use std::fmt::{Display, Formatter, Result as FormatResult};
use std::panic::Location;

use serde_json::Value;
use thiserror::Error as ThisError;

const AUTHENTICATION_MESSAGE: &str = "Key or password incorrect. Please verify and try again.";
const FAILED_CONFIGURATION_MESSAGE: &str =
    "Theme configuration incorrect, maybe theme id is not valid. Please verify and try again.";
const INVALID_OR_NOT_SENT_PARAMS_MESSAGE: &str =
    "Required params not sent or invalid param sent.";
const INVALID_LAYOUT_MESSAGE: &str = "Invalid layout passed. Please verify and try again.";
const RESOURCE_NOT_FOUND_MESSAGE: &str = "Request resource not found or nor valid.";
const FAILED_REMOVE_STATIC_FILE_MESSAGE: &str =
    "Failed to remove static file. Please try again in few moments.";
const FAILED_REMOVE_DYNAMIC_FILE_MESSAGE: &str =
    "Failed to remove dynamic file. Please try again in few moments.";
const UNKNOWN_MESSAGE: &str = "Unable to process request. Tray again in few moments..";

/// Discriminant of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    Authentication,
    FailedConfiguration,
    InvalidOrNotSentParams,
    InvalidLayout,
    ResourceNotFound,
    /// No backend signal is mapped to this kind yet.
    FailedRemoveStaticFile,
    /// No backend signal is mapped to this kind yet.
    FailedRemoveDynamicFile,
    FileExtensionNotAllowed,
    FolderNotAllowed,
    SubfolderNotAllowed,
    Unknown,
}

impl ApiErrorKind {
    pub const ALL: [ApiErrorKind; 11] = [
        ApiErrorKind::Authentication,
        ApiErrorKind::FailedConfiguration,
        ApiErrorKind::InvalidOrNotSentParams,
        ApiErrorKind::InvalidLayout,
        ApiErrorKind::ResourceNotFound,
        ApiErrorKind::FailedRemoveStaticFile,
        ApiErrorKind::FailedRemoveDynamicFile,
        ApiErrorKind::FileExtensionNotAllowed,
        ApiErrorKind::FolderNotAllowed,
        ApiErrorKind::SubfolderNotAllowed,
        ApiErrorKind::Unknown,
    ];

    /// Stable namespaced code.
    pub const fn code(&self) -> &'static str {
        match self {
            ApiErrorKind::Authentication => "SDK::0001",
            ApiErrorKind::FailedConfiguration => "SDK::0002",
            ApiErrorKind::InvalidOrNotSentParams => "SDK::0003",
            ApiErrorKind::InvalidLayout => "SDK::0004",
            ApiErrorKind::ResourceNotFound => "SDK::0005",
            ApiErrorKind::FailedRemoveStaticFile => "SDK::0006",
            ApiErrorKind::FailedRemoveDynamicFile => "SDK::0007",
            ApiErrorKind::FileExtensionNotAllowed => "SDK::0008",
            ApiErrorKind::FolderNotAllowed => "SDK::0009",
            ApiErrorKind::SubfolderNotAllowed => "SDK::0010",
            ApiErrorKind::Unknown => "SDK::9999",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            ApiErrorKind::Authentication => "AuthenticationError",
            ApiErrorKind::FailedConfiguration => "FailedConfigurationError",
            ApiErrorKind::InvalidOrNotSentParams => "InvalidOrNotSentParamsError",
            ApiErrorKind::InvalidLayout => "InvalidLayoutError",
            ApiErrorKind::ResourceNotFound => "ResourceNotFoundError",
            ApiErrorKind::FailedRemoveStaticFile => "FailedRemoveStaticFile",
            ApiErrorKind::FailedRemoveDynamicFile => "FailedRemoveDynamicFile",
            ApiErrorKind::FileExtensionNotAllowed => "FileExtensionNotAllowedError",
            ApiErrorKind::FolderNotAllowed => "FolderNotAllowedError",
            ApiErrorKind::SubfolderNotAllowed => "SubfolderNotAllowedError",
            ApiErrorKind::Unknown => "UnknownError",
        }
    }

    /// Reverse lookup from a stable code.
    pub fn from_code(code: &str) -> Option<ApiErrorKind> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

impl Display for ApiErrorKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        formatter.write_str(self.name())
    }
}

/// Terminal value of a failed operation.
#[derive(Debug, Clone, ThisError)]
#[error("[{}] [{}]: {message} {location}", .kind.name(), .kind.code())]
pub struct ApiError {
    kind: ApiErrorKind,
    message: String,
    details: Option<String>,
    data: Option<Value>,
    location: ErrorLocation,
}

impl ApiError {
    #[track_caller]
    fn new(kind: ApiErrorKind, message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
            data,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Invalid key or password. `details` keeps the backend's own message.
    #[track_caller]
    pub fn authentication(details: impl Into<String>, data: Value) -> Self {
        Self::new(ApiErrorKind::Authentication, AUTHENTICATION_MESSAGE, Some(data))
            .with_details(details)
    }

    #[track_caller]
    pub fn failed_configuration(data: Value) -> Self {
        Self::new(
            ApiErrorKind::FailedConfiguration,
            FAILED_CONFIGURATION_MESSAGE,
            Some(data),
        )
    }

    #[track_caller]
    pub fn invalid_or_not_sent_params(data: Value) -> Self {
        Self::new(
            ApiErrorKind::InvalidOrNotSentParams,
            INVALID_OR_NOT_SENT_PARAMS_MESSAGE,
            Some(data),
        )
    }

    #[track_caller]
    pub fn invalid_layout(data: Value) -> Self {
        Self::new(ApiErrorKind::InvalidLayout, INVALID_LAYOUT_MESSAGE, Some(data))
    }

    #[track_caller]
    pub fn resource_not_found(data: Value) -> Self {
        Self::new(
            ApiErrorKind::ResourceNotFound,
            RESOURCE_NOT_FOUND_MESSAGE,
            Some(data),
        )
    }

    #[track_caller]
    pub fn failed_remove_static_file(data: Value) -> Self {
        Self::new(
            ApiErrorKind::FailedRemoveStaticFile,
            FAILED_REMOVE_STATIC_FILE_MESSAGE,
            Some(data),
        )
    }

    #[track_caller]
    pub fn failed_remove_dynamic_file(data: Value) -> Self {
        Self::new(
            ApiErrorKind::FailedRemoveDynamicFile,
            FAILED_REMOVE_DYNAMIC_FILE_MESSAGE,
            Some(data),
        )
    }

    #[track_caller]
    pub fn file_extension_not_allowed(extensions: &str) -> Self {
        Self::new(
            ApiErrorKind::FileExtensionNotAllowed,
            format!("File extension not allowed. Allowed extensions: {extensions}."),
            None,
        )
    }

    #[track_caller]
    pub fn folder_not_allowed(folders: &str) -> Self {
        Self::new(
            ApiErrorKind::FolderNotAllowed,
            format!("Folder not allowed. Allowed folders: {folders}."),
            None,
        )
    }

    #[track_caller]
    pub fn subfolder_not_allowed(subfolders: &str) -> Self {
        Self::new(
            ApiErrorKind::SubfolderNotAllowed,
            format!(
                "Subfolders not allowed in this folder. Folders that allow subfolders: {subfolders}."
            ),
            None,
        )
    }

    #[track_caller]
    pub fn unknown() -> Self {
        Self::new(ApiErrorKind::Unknown, UNKNOWN_MESSAGE, None)
    }

    #[track_caller]
    pub fn unknown_with_message(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unknown, message, None)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Raw backend payload, when the error came from a response body.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn location(&self) -> ErrorLocation {
        self.location
    }
}

// Location is diagnostic only; two errors are equal when callers would see the same value.
impl PartialEq for ApiError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.message == other.message
            && self.details == other.details
            && self.data == other.data
    }
}
