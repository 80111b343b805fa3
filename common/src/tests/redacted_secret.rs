use crate::RedactedSecret;

/// **VALUE**: Verifies that neither Debug nor Display leak the secret.
///
/// **WHY THIS MATTERS**: Client configuration is logged in debug mode. The store password
/// must never reach a log file.
///
/// **BUG THIS CATCHES**: Would catch a derived Debug replacing the manual impl.
#[test]
fn given_secret_when_formatted_then_value_is_redacted() {
    // GIVEN: A secret
    let secret = RedactedSecret::new("super-secret-password");

    // WHEN: Formatting it both ways
    let debug = format!("{:?}", secret);
    let display = format!("{}", secret);

    // THEN: Value never appears
    assert!(!debug.contains("super-secret-password"));
    assert!(!display.contains("super-secret-password"));
    assert_eq!(secret.expose(), "super-secret-password");
    assert_eq!(secret.len(), 21);
}

/// **VALUE**: Verifies that serialization is refused.
///
/// **BUG THIS CATCHES**: Would catch a `#[derive(Serialize)]` sneaking in and writing the
/// password into a saved config or a debug payload.
#[test]
fn given_secret_when_serialized_then_returns_error() {
    let secret = RedactedSecret::new("token");

    let result = serde_json::to_string(&secret);

    assert!(result.is_err(), "Serialization must fail");
}
