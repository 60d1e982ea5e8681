use screen_digest::EnvConfig;
use screen_digest_cli::init_tracing;

// Own test binary: the subscriber is process-global.
#[test]
fn second_subscriber_install_is_an_error() {
    let config = EnvConfig::default();
    init_tracing(&config).expect("first install should succeed");

    let err = init_tracing(&config).expect_err("a global subscriber is already set");
    assert!(err.to_string().contains("failed to install tracing subscriber"));
}
