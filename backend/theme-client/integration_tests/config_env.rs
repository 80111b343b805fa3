use theme_client::ClientConfig;

use serial_test::serial;

const VARIABLES: [&str; 5] = [
    "OPENCODE_KEY",
    "OPENCODE_PASSWORD",
    "OPENCODE_THEME_ID",
    "OPENCODE_DEBUG",
    "OPENCODE_BASE_URL",
];

fn clear_environment() {
    for name in VARIABLES {
        // SAFETY: tests touching process env are serialized with #[serial]
        unsafe { std::env::remove_var(name) };
    }
}

/// **VALUE**: Verifies the environment variables feed the client configuration.
///
/// **WHY THIS MATTERS**: CI pipelines deploy themes with credentials injected as env vars.
#[test]
#[serial]
fn given_environment_variables_when_loading_config_then_values_used() {
    // GIVEN: Credentials in the environment
    clear_environment();
    // SAFETY: serialized
    unsafe {
        std::env::set_var("OPENCODE_KEY", "env-key");
        std::env::set_var("OPENCODE_PASSWORD", "env-pass");
        std::env::set_var("OPENCODE_THEME_ID", "314");
    }

    // WHEN: Loading
    let config = ClientConfig::from_env().unwrap();

    // THEN: Values picked up
    assert_eq!(config.key(), "env-key");
    assert_eq!(config.theme_id(), Some(314));
    assert_eq!(
        config.authorization_header().expose(),
        "Token token=env-key_env-pass"
    );

    clear_environment();
}

#[test]
#[serial]
fn given_no_credentials_in_environment_when_loading_config_then_error() {
    clear_environment();

    assert!(ClientConfig::from_env().is_err());
}
