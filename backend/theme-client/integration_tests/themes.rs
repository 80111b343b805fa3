use crate::helpers::{
    TEST_AUTHORIZATION, TEST_KEY, TEST_PASSWORD, TEST_THEME_ID, client_for, invalid_token_body,
};

use theme_client::{ApiErrorKind, ClientConfig, GEM_VERSION, ThemeClient};

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the wire contract: path, auth header, accept header, version parameter.
///
/// **WHY THIS MATTERS**: The mock only answers when every part matches, so a drift in any
/// header or parameter fails this test instead of failing against production.
#[tokio::test]
async fn given_valid_credentials_when_listing_themes_then_wire_contract_matches() {
    // GIVEN: A backend expecting the exact contract
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/list"))
        .and(header("Authorization", TEST_AUTHORIZATION))
        .and(header("Accept", "application/json"))
        .and(query_param("gem_version", GEM_VERSION))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "themes": [
                { "id": 1, "name": "Padrão", "published": true },
                { "id": "2", "name": "Rascunho", "published": false }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Listing themes
    let list = client_for(&server, None).list_themes().await.unwrap();

    // THEN: Both themes decoded
    assert_eq!(list.themes.len(), 2);
    assert_eq!(list.themes[1].id, "2");
}

#[tokio::test]
async fn given_invalid_token_when_listing_themes_then_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/list"))
        .respond_with(ResponseTemplate::new(401).set_body_json(invalid_token_body()))
        .mount(&server)
        .await;

    let error = client_for(&server, None).list_themes().await.unwrap_err();

    let api = error.api_error().expect("API error");
    assert_eq!(api.kind(), ApiErrorKind::Authentication);
    assert_eq!(api.code(), "SDK::0001");
    assert_eq!(api.data(), Some(&invalid_token_body()));
}

#[tokio::test]
async fn given_theme_id_when_checking_configuration_then_sent_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/check"))
        .and(query_param("theme_id", TEST_THEME_ID.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "authentication": true,
            "theme_id": TEST_THEME_ID,
            "preview": "https://loja.example/?theme_preview=42"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let status = client_for(&server, Some(TEST_THEME_ID))
        .check_configuration()
        .await
        .unwrap();

    assert!(status.authentication);
    assert_eq!(status.theme_id, Some(TEST_THEME_ID));
}

#[tokio::test]
async fn given_invalid_theme_when_checking_configuration_then_failed_configuration() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/check"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "authentication": true })),
        )
        .mount(&server)
        .await;

    let error = client_for(&server, Some(999))
        .check_configuration()
        .await
        .unwrap_err();

    assert_eq!(error.code(), Some("SDK::0002"));
}

#[tokio::test]
async fn given_name_and_base_when_creating_theme_then_nested_body_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/themes"))
        .and(body_json(json!({
            "theme": { "name": "Natal", "theme_base": "moderno", "gem_version": GEM_VERSION }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "theme_id": 77, "name": "Natal", "preview": "https://p/77", "published": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server, None)
        .create_theme("Natal", Some("moderno"))
        .await
        .unwrap();

    assert_eq!(created.theme_id, 77);
    assert!(!created.published);
}

#[tokio::test]
async fn given_missing_params_when_creating_theme_then_invalid_params_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/themes"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "message": "Parâmetros inválidos", "code": "00101" })),
        )
        .mount(&server)
        .await;

    let error = client_for(&server, None)
        .create_theme("", None)
        .await
        .unwrap_err();

    assert_eq!(error.code(), Some("SDK::0003"));
}

/// **VALUE**: Verifies a delete of an already-removed theme succeeds end to end.
///
/// **BUG THIS CATCHES**: Would catch the transport dropping non-JSON-typed fields or the
/// façade ignoring the reclassification.
#[tokio::test]
async fn given_backend_crash_for_missing_theme_when_deleting_then_true() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/themes/5"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "undefined method `id' for nil:NilClass"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let deleted = client_for(&server, None).delete_theme(5).await.unwrap();

    assert!(deleted);
}

#[tokio::test]
async fn given_success_when_deleting_theme_then_true() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/themes/6"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    assert!(client_for(&server, None).delete_theme(6).await.unwrap());
}

#[tokio::test]
async fn given_cache_cleaned_when_cleaning_cache_then_true() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/clean_cache/"))
        .and(query_param("theme_id", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": { "code": 201, "message": "Cache limpo" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(
        client_for(&server, Some(TEST_THEME_ID))
            .clean_cache(None)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn given_html_error_page_when_calling_then_unknown_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/list"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let error = client_for(&server, None).list_themes().await.unwrap_err();

    let api = error.api_error().expect("API error");
    assert_eq!(api.kind(), ApiErrorKind::Unknown);
    assert_eq!(api.details(), Some("HTTP 502"));
}

/// **VALUE**: Verifies a connection failure still produces exactly one typed error.
///
/// **WHY THIS MATTERS**: Callers must always get a result for a network call, never a panic.
#[tokio::test]
async fn given_unreachable_backend_when_calling_then_unknown_error() {
    // GIVEN: A base URL nothing listens on
    let config = ClientConfig::builder()
        .with_key(TEST_KEY)
        .with_password(TEST_PASSWORD)
        .with_base_url("http://127.0.0.1:1/api/")
        .with_timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    let client = ThemeClient::new(config).unwrap();

    // WHEN: Calling
    let error = client.list_themes().await.unwrap_err();

    // THEN: Unknown error naming the connection failure
    assert_eq!(error.code(), Some("SDK::9999"));
    let details = error.api_error().and_then(|e| e.details()).unwrap_or_default();
    assert!(details.starts_with("Connection failed: "), "{details}");
}
