use env_loadr::Registry;
use serial_test::serial;
use std::time::Duration;

#[test]
#[serial]
fn test_optional_field_missing_uses_default() {
    dotenvy::from_filename("./test.env").ok();
    // TEST_MISSING_OPT_PORT should not be set
    let mut registry = Registry::new();
    let port = registry.int("TEST_MISSING_OPT_PORT", false, 8080, "Optional port");

    assert!(registry.parse().is_ok());
    assert_eq!(port.get(), Some(8080));
}

#[test]
#[serial]
fn test_optional_field_wrong_type_returns_error() {
    dotenvy::from_filename("./test.env").ok();
    // TEST_WRONG_TYPE should be configured, but not be an int
    let mut registry = Registry::new();
    let wrong_type = registry.int("TEST_WRONG_TYPE", false, 8080, "Optional port");

    let err = registry.parse().unwrap_err();

    assert_eq!(
        err.to_string(),
        "expected: TEST_WRONG_TYPE type: integer got: not-a-number"
    );
    assert_eq!(wrong_type.get(), None);
}

#[test]
#[serial]
fn test_all_failures_reported_together() {
    dotenvy::from_filename("./test.env").ok();
    let mut registry = Registry::new();
    let string = registry.string("TEST_STRING", true, "", "String value");
    let _ = registry.int("TEST_WRONG_TYPE", false, 0, "Wrong type");
    let int = registry.int("TEST_INT", true, 0, "Integer value");
    let _ = registry.duration("TEST_BAD_DURATION", false, Duration::ZERO, "Bad duration");

    let err = registry.parse().unwrap_err();

    assert_eq!(err.len(), 2);
    assert_eq!(
        err.names().collect::<Vec<_>>(),
        vec!["TEST_WRONG_TYPE", "TEST_BAD_DURATION"]
    );
    assert_eq!(
        err.failures()[1].to_string(),
        "expected: TEST_BAD_DURATION type: duration got: test"
    );
    assert_eq!(string.get().as_deref(), Some("test"));
    assert_eq!(int.get(), Some(42));
}

#[test]
fn test_help_before_parse() {
    let mut registry = Registry::new();
    let _ = registry.string("BIND_ADDRESS", true, "", "bind address for server, i.e. localhost");
    let _ = registry.int("BIND_PORT", true, 0, "bind port for server, i.e. 9090");

    let help = registry.help();

    assert_eq!(help.lines().count(), 5);
    assert!(help.starts_with("Environment variables:\n  BIND_ADDRESS  default: no default"));
}
