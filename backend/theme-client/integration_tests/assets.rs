use crate::helpers::{TEST_THEME_ID, client_for};

use theme_client::{ApiErrorKind, ThemeClientError};

use base64::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ASSETS_PATH: &str = "/api/themes/42/assets";

const WOFF2_BYTES: [u8; 12] = [
    0x77, 0x4F, 0x46, 0x32, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00,
];

#[tokio::test]
async fn given_theme_when_listing_assets_then_list_and_quantity_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ASSETS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "assets": [
                { "id": 1, "name": "theme.css", "path": "/css/theme.css", "dynamic": false,
                  "directory_id": 2, "theme_id": 42, "seller_id": 7,
                  "created_at": "2024-05-01 10:00:00", "updated_at": "2024-05-02 10:00:00" },
                { "id": 2, "name": "home.html", "path": "/pages/home.html", "dynamic": true }
            ],
            "quantity": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let list = client_for(&server, Some(TEST_THEME_ID))
        .list_assets()
        .await
        .unwrap();

    assert_eq!(list.quantity, 2);
    assert_eq!(list.assets[0].path, "/css/theme.css");
    assert!(list.assets[1].dynamic);
}

/// **VALUE**: Verifies binary assets are decoded and flagged from their bytes.
///
/// **BUG THIS CATCHES**: Would catch the binary flag being taken from the path extension or
/// the `attachment` key being ignored on reads.
#[tokio::test]
async fn given_font_attachment_when_getting_asset_then_binary_content_returned() {
    // GIVEN: A font served as an attachment
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ASSETS_PATH))
        .and(query_param("key", "/css/fonts/icons.woff2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "key": "/css/fonts/icons.woff2",
            "dynamic_file": false,
            "attachment": BASE64_STANDARD.encode(WOFF2_BYTES),
            "public_url": "https://cdn.example/icons.woff2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Reading it
    let asset = client_for(&server, Some(TEST_THEME_ID))
        .get_asset("css/fonts/icons.woff2")
        .await
        .unwrap();

    // THEN: Raw bytes, flagged binary
    assert_eq!(asset.content, WOFF2_BYTES.to_vec());
    assert!(asset.binary);
    assert!(!asset.dynamic);
}

/// **VALUE**: Verifies sent bytes come back unchanged through a get.
///
/// **WHY THIS MATTERS**: Encoding asymmetry (padding, URL-safe alphabet) would corrupt every
/// uploaded image while text files keep working.
#[tokio::test]
async fn given_sent_asset_when_read_back_then_bytes_match() {
    // GIVEN: A backend accepting uploads
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(ASSETS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "key": "/js/app.js" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some(TEST_THEME_ID));
    let original = "const título = 'olá';\n".as_bytes();

    // WHEN: Sending, then serving back exactly what was stored
    assert!(client.send_asset("js/app.js", original).await.unwrap());

    let received = server.received_requests().await.expect("Recording enabled");
    let stored: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(stored["key"], json!("/js/app.js"));

    Mock::given(method("GET"))
        .and(path(ASSETS_PATH))
        .and(query_param("key", "/js/app.js"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "key": "/js/app.js",
            "dynamic_file": false,
            "value": stored["value"].clone()
        })))
        .mount(&server)
        .await;

    let asset = client.get_asset("/js/app.js").await.unwrap();

    // THEN: Same bytes
    assert_eq!(asset.content, original.to_vec());
    assert!(!asset.binary);
}

/// **VALUE**: Verifies binary bytes travel under `attachment` and come back unchanged.
///
/// **BUG THIS CATCHES**: Would catch fonts being sent as `value`, or a lossy UTF-8 step on
/// either side of the round trip.
#[tokio::test]
async fn given_sent_font_when_read_back_then_attachment_bytes_match() {
    // GIVEN: A backend accepting uploads
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(ASSETS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "key": "/css/fonts/icons.woff2" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some(TEST_THEME_ID));

    // WHEN: Sending a font, then serving back the stored attachment
    assert!(
        client
            .send_asset("css/fonts/icons.woff2", &WOFF2_BYTES)
            .await
            .unwrap()
    );

    let received = server.received_requests().await.expect("Recording enabled");
    let stored: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(stored["key"], json!("/css/fonts/icons.woff2"));
    assert!(stored.get("value").is_none());

    Mock::given(method("GET"))
        .and(path(ASSETS_PATH))
        .and(query_param("key", "/css/fonts/icons.woff2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "key": "/css/fonts/icons.woff2",
            "dynamic_file": false,
            "value": null,
            "attachment": stored["attachment"].clone()
        })))
        .mount(&server)
        .await;

    let asset = client.get_asset("/css/fonts/icons.woff2").await.unwrap();

    // THEN: Same bytes, flagged binary
    assert_eq!(asset.content, WOFF2_BYTES.to_vec());
    assert!(asset.binary);
}

#[tokio::test]
async fn given_disallowed_extension_when_sending_asset_then_no_request_made() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let error = client_for(&server, Some(TEST_THEME_ID))
        .send_asset("/layouts/theme.exe", b"MZ")
        .await
        .unwrap_err();

    assert_eq!(
        error.api_error().map(|e| e.kind()),
        Some(ApiErrorKind::FileExtensionNotAllowed)
    );
}

#[tokio::test]
async fn given_no_theme_when_sending_asset_then_missing_theme_id() {
    let server = MockServer::start().await;

    let error = client_for(&server, None)
        .send_asset("css/a.css", b"a{}")
        .await
        .unwrap_err();

    assert!(matches!(error, ThemeClientError::MissingThemeId { .. }));
}

#[tokio::test]
async fn given_upload_marker_when_deleting_asset_then_true() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(ASSETS_PATH))
        .and(query_param("key", "/css/old.css"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "undefined local variable or method `upfile_updated' for #<ThemeFile>"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let deleted = client_for(&server, Some(TEST_THEME_ID))
        .delete_asset("css/old.css")
        .await
        .unwrap();

    assert!(deleted);
}

#[tokio::test]
async fn given_missing_file_when_deleting_asset_then_resource_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(ASSETS_PATH))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "message": "Arquivo não encontrado", "code": "00102" })),
        )
        .mount(&server)
        .await;

    let error = client_for(&server, Some(TEST_THEME_ID))
        .delete_asset("img/missing.png")
        .await
        .unwrap_err();

    assert_eq!(error.code(), Some("SDK::0005"));
}
