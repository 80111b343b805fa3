//! Test helpers for client integration tests.
//!
//! - Starting a mock backend
//! - Building a client pointed at it
//! - Canned backend bodies

use theme_client::{ClientConfig, ThemeClient};

use serde_json::{Value, json};
use wiremock::MockServer;

pub const TEST_KEY: &str = "test-key";
pub const TEST_PASSWORD: &str = "test-password";
pub const TEST_AUTHORIZATION: &str = "Token token=test-key_test-password";
pub const TEST_THEME_ID: u64 = 42;

/// Test helper: base URL for the mock server's API root.
pub fn api_base(server: &MockServer) -> String {
    format!("{}/api/", server.uri())
}

/// Test helper: client against `server`, optionally scoped to a theme.
pub fn client_for(server: &MockServer, theme_id: Option<u64>) -> ThemeClient {
    let mut builder = ClientConfig::builder()
        .with_key(TEST_KEY)
        .with_password(TEST_PASSWORD)
        .with_base_url(api_base(server));
    if let Some(theme_id) = theme_id {
        builder = builder.with_theme_id(theme_id);
    }

    ThemeClient::new(builder.build().expect("Valid test config")).expect("Client should build")
}

/// The backend's invalid token payload.
pub fn invalid_token_body() -> Value {
    json!({ "message": "Token de acesso inválido", "code": "00001", "status": 401 })
}
