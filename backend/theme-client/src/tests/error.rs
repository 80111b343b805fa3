use crate::error::{ApiError, ApiErrorKind, ThemeClientError};

use serde_json::json;

/// **VALUE**: Verifies every kind has a distinct, stable code.
///
/// **WHY THIS MATTERS**: Codes are the only contract callers may branch on.
///
/// **BUG THIS CATCHES**: Would catch copy-paste duplicates when adding a kind.
#[test]
fn given_all_kinds_when_codes_listed_then_unique_and_reversible() {
    let codes: Vec<&str> = ApiErrorKind::ALL.iter().map(ApiErrorKind::code).collect();

    let mut deduped = codes.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(deduped.len(), codes.len(), "Codes must be unique");

    for kind in ApiErrorKind::ALL {
        assert_eq!(ApiErrorKind::from_code(kind.code()), Some(kind));
    }
    assert_eq!(ApiErrorKind::from_code("SDK::1234"), None);
}

#[test]
fn given_reserved_removal_kinds_when_constructed_then_keep_their_codes() {
    let static_file = ApiError::failed_remove_static_file(json!({}));
    let dynamic_file = ApiError::failed_remove_dynamic_file(json!({}));

    assert_eq!(static_file.code(), "SDK::0006");
    assert_eq!(dynamic_file.code(), "SDK::0007");
    assert_ne!(static_file, dynamic_file);
}

/// **VALUE**: Verifies the Display format `[Name] [code]: message` plus location.
///
/// **BUG THIS CATCHES**: Would catch a Display that drops the code.
#[test]
fn given_api_error_when_formatted_then_includes_name_code_message_and_location() {
    let error = ApiError::invalid_layout(json!({ "code": "00301" }));

    let formatted = error.to_string();

    assert!(formatted.starts_with(
        "[InvalidLayoutError] [SDK::0004]: Invalid layout passed. Please verify and try again."
    ));
    assert!(formatted.contains("error.rs"));
}

/// **VALUE**: Verifies equality ignores the construction site.
///
/// **BUG THIS CATCHES**: Would catch a derived PartialEq making identical errors unequal
/// because they were built on different lines.
#[test]
fn given_same_error_built_twice_when_compared_then_equal() {
    let first = ApiError::unknown();
    let second = ApiError::unknown();

    assert_ne!(first.location().line, second.location().line);
    assert_eq!(first, second);
    assert_ne!(first, ApiError::unknown().with_details("HTTP 500"));
}

#[test]
fn given_unknown_without_message_when_built_then_default_message() {
    let error = ApiError::unknown();

    assert_eq!(error.message(), "Unable to process request. Tray again in few moments..");
    assert_eq!(error.data(), None);
}

#[test]
fn given_client_error_when_queried_then_code_only_for_api_errors() {
    let api: ThemeClientError = ApiError::resource_not_found(json!({})).into();
    let missing = ThemeClientError::MissingThemeId {
        operation: "list_assets",
        location: common::ErrorLocation::from(std::panic::Location::caller()),
    };

    assert_eq!(api.code(), Some("SDK::0005"));
    assert_eq!(missing.code(), None);
    assert!(missing.to_string().contains("list_assets requires a theme id"));
}
