// Unit tests for failed-call classification
// Each operation's rule order is exercised through the public classify() entry point

use crate::classifier::{
    CLEAN_CACHE_FAILURE_CODE, Classification, FailedCall, INVALID_TOKEN_MESSAGE, Operation,
    body_code, check_clean_cache_body, classify,
};
use crate::error::ApiErrorKind;

use common::HttpStatusCode;
use serde_json::{Value, json};

const ALL_OPERATIONS: [Operation; 9] = [
    Operation::CheckConfiguration,
    Operation::ListThemes,
    Operation::CreateTheme,
    Operation::DeleteTheme,
    Operation::CleanCache,
    Operation::ListAssets,
    Operation::GetAsset,
    Operation::SendAsset,
    Operation::DeleteAsset,
];

fn response(status: u16, body: Value) -> FailedCall {
    FailedCall::Response {
        status: HttpStatusCode(status),
        body: Some(body),
    }
}

fn invalid_token_body() -> Value {
    json!({ "message": INVALID_TOKEN_MESSAGE, "code": "00001", "status": 401 })
}

fn failure_kind(classification: Classification) -> ApiErrorKind {
    match classification {
        Classification::Failure(error) => error.kind(),
        Classification::ReclassifiedSuccess => panic!("Expected failure, got reclassified success"),
    }
}

// ============================================
// AUTHENTICATION
// ============================================

/// **VALUE**: Verifies the invalid-token body is an authentication error on every operation.
///
/// **WHY THIS MATTERS**: Bad credentials can surface on any endpoint. Callers prompt for new
/// credentials only when they see `SDK::0001`.
///
/// **BUG THIS CATCHES**: Would catch the auth check being wired into some operations only,
/// or running after an operation rule that shadows it.
#[test]
fn given_invalid_token_body_when_classified_then_authentication_for_every_operation() {
    for operation in ALL_OPERATIONS {
        // GIVEN: The backend's invalid token response
        let call = response(401, invalid_token_body());

        // WHEN: Classifying
        let result = classify(operation, &call);

        // THEN: Authentication error, carrying backend message as details
        match result {
            Classification::Failure(error) => {
                assert_eq!(error.kind(), ApiErrorKind::Authentication, "{operation}");
                assert_eq!(error.code(), "SDK::0001");
                assert_eq!(error.details(), Some(INVALID_TOKEN_MESSAGE));
                assert_eq!(error.data(), Some(&invalid_token_body()));
            }
            Classification::ReclassifiedSuccess => panic!("{operation} reclassified auth failure"),
        }
    }
}

/// **VALUE**: Verifies the auth check requires all three conditions.
///
/// **BUG THIS CATCHES**: Would catch an OR where an AND belongs, e.g. every 401 becoming
/// an authentication error.
#[test]
fn given_partial_auth_conditions_when_classified_then_not_authentication() {
    let wrong_code = json!({ "message": INVALID_TOKEN_MESSAGE, "code": "00002" });
    let wrong_message = json!({ "message": "Token expirado", "code": "00001" });
    let wrong_status = json!({ "message": INVALID_TOKEN_MESSAGE, "code": "00001" });

    assert_eq!(
        failure_kind(classify(Operation::ListThemes, &response(401, wrong_code))),
        ApiErrorKind::Unknown
    );
    assert_eq!(
        failure_kind(classify(Operation::ListThemes, &response(401, wrong_message))),
        ApiErrorKind::Unknown
    );
    assert_eq!(
        failure_kind(classify(Operation::ListThemes, &response(400, wrong_status))),
        ApiErrorKind::Unknown
    );
}

/// **VALUE**: Verifies a status echoed in the body satisfies the status condition.
///
/// **WHY THIS MATTERS**: Some gateways rewrite the HTTP status while the backend still
/// reports 401 in its payload.
#[test]
fn given_body_status_401_when_http_status_differs_then_authentication() {
    let call = response(500, invalid_token_body());

    assert_eq!(
        failure_kind(classify(Operation::ListThemes, &call)),
        ApiErrorKind::Authentication
    );
}

// ============================================
// CHECK CONFIGURATION
// ============================================

/// **VALUE**: Verifies a failed check with an `authentication` field is a configuration error.
///
/// **WHY THIS MATTERS**: The backend answers `{ authentication: true }` with an error status
/// when the credentials are fine but the theme id is not. Reporting that as bad credentials
/// sends the user after the wrong problem.
///
/// **BUG THIS CATCHES**: Would catch partial auth matches winning over the field check.
#[test]
fn given_authentication_field_when_check_fails_then_failed_configuration() {
    // GIVEN: Body with the field and part of the auth trigger
    let body = json!({ "authentication": true, "message": INVALID_TOKEN_MESSAGE });

    // WHEN: Classifying a 401 check
    let result = classify(Operation::CheckConfiguration, &response(401, body.clone()));

    // THEN: FailedConfiguration with the body as data
    match result {
        Classification::Failure(error) => {
            assert_eq!(error.kind(), ApiErrorKind::FailedConfiguration);
            assert_eq!(error.code(), "SDK::0002");
            assert_eq!(error.data(), Some(&body));
        }
        Classification::ReclassifiedSuccess => panic!("Unexpected success"),
    }
}

#[test]
fn given_authentication_field_on_other_operation_when_classified_then_unknown() {
    let body = json!({ "authentication": false });

    assert_eq!(
        failure_kind(classify(Operation::ListThemes, &response(400, body))),
        ApiErrorKind::Unknown
    );
}

// ============================================
// DELETE THEME
// ============================================

/// **VALUE**: Verifies the missing-theme diagnostic turns a failed delete into success.
///
/// **WHY THIS MATTERS**: The backend crashes with this message when the theme is already
/// gone. Surfacing it as an error would make deletes non-idempotent for callers.
///
/// **BUG THIS CATCHES**: Would catch the marker losing its backtick/quote characters or
/// the rule being applied to the wrong operation.
#[test]
fn given_undefined_id_message_when_delete_theme_fails_then_reclassified_success() {
    // GIVEN: The backend's crash message embedded in a longer text
    let body = json!({
        "message": "NoMethodError: undefined method `id' for nil:NilClass",
        "code": "00301"
    });

    // WHEN: Classifying a delete-theme failure
    let result = classify(Operation::DeleteTheme, &response(500, body));

    // THEN: Success, even though the code alone would mean InvalidLayout
    assert_eq!(result, Classification::ReclassifiedSuccess);
}

#[test]
fn given_layout_code_when_delete_theme_fails_then_invalid_layout() {
    let body = json!({ "message": "Layout inválido", "code": "00301" });

    let result = classify(Operation::DeleteTheme, &response(400, body));

    assert_eq!(failure_kind(result), ApiErrorKind::InvalidLayout);
}

#[test]
fn given_undefined_id_message_on_other_operation_when_classified_then_not_success() {
    let body = json!({ "message": "undefined method `id' for nil" });

    let result = classify(Operation::DeleteAsset, &response(500, body));

    assert_eq!(failure_kind(result), ApiErrorKind::Unknown);
}

/// **VALUE**: Verifies the marker is a literal match, not a loose one.
///
/// **BUG THIS CATCHES**: Would catch normalizing quotes or matching on "undefined method".
#[test]
fn given_marker_with_different_quotes_when_delete_theme_fails_then_unknown() {
    let body = json!({ "message": "undefined method 'id'" });

    let result = classify(Operation::DeleteTheme, &response(500, body));

    assert_eq!(failure_kind(result), ApiErrorKind::Unknown);
}

// ============================================
// ASSETS
// ============================================

#[test]
fn given_upfile_message_when_delete_asset_fails_then_reclassified_success() {
    let body = json!({
        "message": "undefined local variable or method `upfile_updated' for #<Theme>",
        "code": "00102"
    });

    let result = classify(Operation::DeleteAsset, &response(500, body));

    assert_eq!(result, Classification::ReclassifiedSuccess);
}

#[test]
fn given_param_and_missing_codes_when_delete_asset_fails_then_specific_errors() {
    let params = json!({ "message": "Parâmetros inválidos", "code": "00101" });
    let missing = json!({ "message": "Arquivo não encontrado", "code": "00102" });

    assert_eq!(
        failure_kind(classify(Operation::DeleteAsset, &response(400, params))),
        ApiErrorKind::InvalidOrNotSentParams
    );
    assert_eq!(
        failure_kind(classify(Operation::DeleteAsset, &response(404, missing))),
        ApiErrorKind::ResourceNotFound
    );
}

#[test]
fn given_param_code_when_create_or_send_fails_then_invalid_params() {
    let body = json!({ "code": "00101" });

    assert_eq!(
        failure_kind(classify(Operation::CreateTheme, &response(400, body.clone()))),
        ApiErrorKind::InvalidOrNotSentParams
    );
    assert_eq!(
        failure_kind(classify(Operation::SendAsset, &response(400, body))),
        ApiErrorKind::InvalidOrNotSentParams
    );
}

/// **VALUE**: Verifies body codes only apply to the operations that define them.
///
/// **BUG THIS CATCHES**: Would catch a global code table leaking `00102` into theme listing.
#[test]
fn given_not_found_code_when_list_themes_fails_then_unknown() {
    let body = json!({ "code": "00102" });

    assert_eq!(
        failure_kind(classify(Operation::ListThemes, &response(404, body))),
        ApiErrorKind::Unknown
    );
}

// ============================================
// FALLBACK AND TOTALITY
// ============================================

/// **VALUE**: Verifies that absent, malformed and transport-level failures all land on Unknown.
///
/// **WHY THIS MATTERS**: Classification must never panic; every network-reachable call
/// needs exactly one outcome.
#[test]
fn given_unusable_failures_when_classified_then_unknown() {
    let no_body = FailedCall::Response {
        status: HttpStatusCode(502),
        body: None,
    };
    let not_an_object = response(500, json!(["unexpected"]));
    let transport = FailedCall::Transport {
        message: String::from("connection refused"),
    };

    for call in [no_body, not_an_object, transport] {
        match classify(Operation::GetAsset, &call) {
            Classification::Failure(error) => {
                assert_eq!(error.code(), "SDK::9999");
                assert_eq!(error.kind(), ApiErrorKind::Unknown);
            }
            Classification::ReclassifiedSuccess => panic!("Unexpected success"),
        }
    }
}

#[test]
fn given_transport_failure_when_classified_then_message_kept_as_details() {
    let call = FailedCall::Transport {
        message: String::from("operation timed out"),
    };

    match classify(Operation::ListThemes, &call) {
        Classification::Failure(error) => {
            assert_eq!(error.details(), Some("operation timed out"));
        }
        Classification::ReclassifiedSuccess => panic!("Unexpected success"),
    }
}

/// **VALUE**: Verifies classification has no hidden state.
///
/// **BUG THIS CATCHES**: Would catch caching or counters that make a second identical
/// failure classify differently.
#[test]
fn given_same_failure_when_classified_twice_then_results_are_equal() {
    let call = response(400, json!({ "message": "Layout inválido", "code": "00301" }));

    let first = classify(Operation::DeleteTheme, &call);
    let second = classify(Operation::DeleteTheme, &call);

    assert_eq!(first, second);
}

#[test]
fn given_numeric_body_code_when_read_then_zero_padded() {
    assert_eq!(body_code(&json!({ "code": 101 })).as_deref(), Some("00101"));
    assert_eq!(body_code(&json!({ "code": "00301" })).as_deref(), Some("00301"));
    assert_eq!(body_code(&json!({ "code": null })), None);
    assert_eq!(body_code(&json!({})), None);
}

#[test]
fn given_numeric_param_code_when_create_fails_then_invalid_params() {
    let body = json!({ "code": 101 });

    assert_eq!(
        failure_kind(classify(Operation::CreateTheme, &response(400, body))),
        ApiErrorKind::InvalidOrNotSentParams
    );
}

// ============================================
// CLEAN CACHE BODY
// ============================================

/// **VALUE**: Pins the clean-cache polarity: nested code 200 is a failure.
///
/// **WHY THIS MATTERS**: Historical clients disagreed on this. Flipping the contract must be
/// a one-constant change that this test forces to be deliberate.
#[test]
fn given_nested_failure_code_when_clean_cache_checked_then_unknown_with_details() {
    // GIVEN: Nested response carrying the failure code
    let body = json!({
        "response": { "code": CLEAN_CACHE_FAILURE_CODE, "message": "Cache busy" }
    });

    // WHEN: Checking the body
    let result = check_clean_cache_body(Some(&body));

    // THEN: Unknown error whose message embeds the backend detail
    let error = result.expect_err("Nested failure code must be rejected");
    assert_eq!(error.kind(), ApiErrorKind::Unknown);
    assert_eq!(error.message(), "Unknown error. Details: Cache busy");
}

#[test]
fn given_other_nested_code_when_clean_cache_checked_then_ok() {
    let body = json!({ "response": { "code": 201, "message": "Cache limpo" } });

    assert!(check_clean_cache_body(Some(&body)).is_ok());
}

#[test]
fn given_missing_nested_response_when_clean_cache_checked_then_unknown() {
    let error = check_clean_cache_body(Some(&json!({ "ok": true })))
        .expect_err("Missing nested object must be rejected");
    assert_eq!(error.kind(), ApiErrorKind::Unknown);

    assert!(check_clean_cache_body(None).is_err());
}
