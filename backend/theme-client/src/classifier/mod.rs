//! Maps failed calls to a single typed outcome.
//!
//! The authentication check runs first for every operation, then the
//! operation's own rules in order, then the unknown fallback. Classification
//! is total: a missing or malformed body simply falls through to
//! [`ApiErrorKind::Unknown`].

mod rules;

pub use rules::Operation;

use crate::error::{ApiError, ApiErrorKind};

use rules::Rule;

use common::HttpStatusCode;

use serde_json::Value;

/// Backend message for a rejected token. Compared byte for byte.
pub const INVALID_TOKEN_MESSAGE: &str = "Token de acesso inválido";

pub const AUTHENTICATION_BODY_CODE: &str = "00001";

/// Nested clean-cache code treated as failure. Any other nested code is success.
pub const CLEAN_CACHE_FAILURE_CODE: u64 = 200;

const BODY_CODE_WIDTH: usize = 5;

/// A call that did not produce a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum FailedCall {
    /// The backend answered with a non-success status.
    Response {
        status: HttpStatusCode,
        body: Option<Value>,
    },
    /// No response was received (network failure, timeout).
    Transport { message: String },
}

/// Result of classifying a [`FailedCall`].
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Failure(ApiError),
    /// The backend reported a failure that the operation treats as done.
    ReclassifiedSuccess,
}

/// Classify a failed call made by `operation`.
#[track_caller]
pub fn classify(operation: Operation, call: &FailedCall) -> Classification {
    let (status, body) = match call {
        FailedCall::Transport { message } => {
            return Classification::Failure(ApiError::unknown().with_details(message.clone()));
        }
        FailedCall::Response { status, body } => (*status, body),
    };

    let Some(body) = body else {
        return Classification::Failure(unknown_for_status(status));
    };

    if is_authentication_failure(status, body) {
        let details = body_message(body).unwrap_or_default();
        return Classification::Failure(ApiError::authentication(details, body.clone()));
    }

    for rule in operation.rules() {
        match rule {
            Rule::AuthenticationField => {
                if body.get("authentication").is_some() {
                    return Classification::Failure(ApiError::failed_configuration(body.clone()));
                }
            }
            Rule::ReclassifyAsSuccess(marker) => {
                if body_message(body).is_some_and(|message| message.contains(*marker)) {
                    return Classification::ReclassifiedSuccess;
                }
            }
            Rule::BodyCode(code, kind) => {
                if body_code(body).as_deref() == Some(*code) {
                    return Classification::Failure(error_for_kind(*kind, body.clone()));
                }
            }
        }
    }

    Classification::Failure(unknown_for_status(status))
}

/// Validate a clean-cache body that arrived with a success status.
///
/// # Errors
///
/// Returns an unknown [`ApiError`] when the nested `response` object is
/// missing or its `code` equals [`CLEAN_CACHE_FAILURE_CODE`].
#[track_caller]
pub fn check_clean_cache_body(body: Option<&Value>) -> Result<(), ApiError> {
    let Some(nested) = body.and_then(|body| body.get("response")) else {
        return Err(ApiError::unknown().with_details("Missing clean cache response object"));
    };

    if numeric_field(nested, "code") == Some(CLEAN_CACHE_FAILURE_CODE) {
        let message = body_message(nested).unwrap_or_default();
        return Err(ApiError::unknown_with_message(format!(
            "Unknown error. Details: {message}"
        ))
        .with_data(nested.clone()));
    }

    Ok(())
}

fn is_authentication_failure(status: HttpStatusCode, body: &Value) -> bool {
    let status_matches = status == HttpStatusCode::UNAUTHORIZED
        || numeric_field(body, "status") == Some(u64::from(HttpStatusCode::UNAUTHORIZED.0));

    body_message(body) == Some(INVALID_TOKEN_MESSAGE)
        && body_code(body).as_deref() == Some(AUTHENTICATION_BODY_CODE)
        && status_matches
}

#[track_caller]
fn error_for_kind(kind: ApiErrorKind, body: Value) -> ApiError {
    match kind {
        ApiErrorKind::FailedConfiguration => ApiError::failed_configuration(body),
        ApiErrorKind::InvalidOrNotSentParams => ApiError::invalid_or_not_sent_params(body),
        ApiErrorKind::InvalidLayout => ApiError::invalid_layout(body),
        ApiErrorKind::ResourceNotFound => ApiError::resource_not_found(body),
        ApiErrorKind::FailedRemoveStaticFile => ApiError::failed_remove_static_file(body),
        ApiErrorKind::FailedRemoveDynamicFile => ApiError::failed_remove_dynamic_file(body),
        ApiErrorKind::Authentication
        | ApiErrorKind::FileExtensionNotAllowed
        | ApiErrorKind::FolderNotAllowed
        | ApiErrorKind::SubfolderNotAllowed
        | ApiErrorKind::Unknown => ApiError::unknown().with_data(body),
    }
}

#[track_caller]
fn unknown_for_status(status: HttpStatusCode) -> ApiError {
    ApiError::unknown().with_details(format!("HTTP {status}"))
}

pub(crate) fn body_message(body: &Value) -> Option<&str> {
    body.get("message").and_then(Value::as_str)
}

/// Backend code as a string. Numeric codes are zero-padded ("101" -> "00101").
pub(crate) fn body_code(body: &Value) -> Option<String> {
    match body.get("code")? {
        Value::String(code) => Some(code.clone()),
        Value::Number(number) => number
            .as_u64()
            .map(|code| format!("{code:0width$}", width = BODY_CODE_WIDTH)),
        _ => None,
    }
}

fn numeric_field(value: &Value, field: &str) -> Option<u64> {
    match value.get(field)? {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
