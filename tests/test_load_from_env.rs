use env_loadr::Registry;
use serial_test::serial;
use std::time::Duration;

fn set_env(name: &str, value: &str) {
    std::env::set_var(name, value);
}

fn unset_env(name: &str) {
    std::env::remove_var(name);
}

#[test]
#[serial]
fn test_load_required_from_env() {
    // Values come from test.env
    dotenvy::from_filename("./test.env").ok();

    let mut registry = Registry::new();
    let string = registry.string("TEST_STRING", true, "", "String value");
    let int = registry.int("TEST_INT", true, 0, "Integer value");
    let hex = registry.int("TEST_HEX_INT", true, 0, "Hex integer value");
    let float = registry.float("TEST_FLOAT", true, 0.0, "Float value");
    let bool_true = registry.boolean("TEST_BOOL_TRUE", true, false, "Boolean value");
    let bool_false = registry.boolean("TEST_BOOL_FALSE", true, true, "Boolean value");
    let duration = registry.duration("TEST_DURATION", true, Duration::ZERO, "Duration value");

    registry.parse().unwrap();

    assert_eq!(string.get().as_deref(), Some("test"));
    assert_eq!(int.get(), Some(42));
    assert_eq!(hex.get(), Some(31));
    assert_eq!(float.get(), Some(1.5));
    assert_eq!(bool_true.get(), Some(true));
    assert_eq!(bool_false.get(), Some(false));
    assert_eq!(duration.get(), Some(Duration::from_secs(5400)));
}

#[test]
#[serial]
fn test_env_overrides_defaults() {
    dotenvy::from_filename("./test.env").ok();

    let mut registry = Registry::new();
    let int = registry.int("TEST_INT", false, 8080, "Integer value");
    let string = registry.string("TEST_STRING", false, "localhost", "String value");

    registry.parse().unwrap();

    assert_eq!(int.get(), Some(42));
    assert_eq!(string.get().as_deref(), Some("test"));
}

#[test]
#[serial]
fn test_missing_optional_uses_defaults() {
    let mut registry = Registry::new();
    let port = registry.int("TEST_DEFAULT_PORT", false, 8080, "Server port");
    let host = registry.string("TEST_DEFAULT_HOST", false, "localhost", "Server host");
    let debug = registry.boolean("TEST_DEFAULT_DEBUG", false, false, "Enable debug mode");
    let timeout = registry.duration(
        "TEST_DEFAULT_TIMEOUT",
        false,
        Duration::from_secs(1),
        "Read timeout",
    );

    assert!(registry.parse().is_ok());

    assert_eq!(port.get(), Some(8080));
    assert_eq!(host.get().as_deref(), Some("localhost"));
    assert_eq!(debug.get(), Some(false));
    assert_eq!(timeout.get(), Some(Duration::from_secs(1)));
}

#[test]
#[serial]
fn test_missing_required_from_env() {
    let mut registry = Registry::new();
    let _ = registry.int("MISSING_TEST_INT", true, 8080, "Integer value");
    let _ = registry.string("MISSING_TEST_STRING", true, "x", "String value");
    let _ = registry.boolean("MISSING_TEST_BOOL", true, true, "Boolean value");

    let err = registry.parse().unwrap_err();

    assert_eq!(
        err.to_string(),
        "expected: MISSING_TEST_INT type: integer got: \n\
         expected: MISSING_TEST_STRING type: string got: \n\
         expected: MISSING_TEST_BOOL type: boolean got: "
    );
}

#[test]
#[serial]
fn test_set_and_unset_between_parses() {
    unset_env("nic");

    let mut registry = Registry::new();
    let n = registry.int("nic", true, 0, "something");

    set_env("nic", "1");
    registry.parse().unwrap();
    assert_eq!(n.get(), Some(1));

    set_env("nic", "a");
    let err = registry.parse().unwrap_err();
    assert_eq!(err.to_string(), "expected: nic type: integer got: a");
    assert_eq!(n.get(), Some(1));

    unset_env("nic");
    let err = registry.parse().unwrap_err();
    assert_eq!(err.to_string(), "expected: nic type: integer got: ");
}

#[test]
#[serial]
fn test_empty_value_counts_as_unset() {
    set_env("TEST_EMPTY_VALUE", "");

    let mut registry = Registry::new();
    let n = registry.string("TEST_EMPTY_VALUE", false, "is unset", "something");

    registry.parse().unwrap();
    unset_env("TEST_EMPTY_VALUE");

    assert_eq!(n.get().as_deref(), Some("is unset"));
}

#[cfg(unix)]
#[test]
#[serial]
fn test_non_utf8_value_is_reported_not_defaulted() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    std::env::set_var("TEST_NON_UTF8", OsStr::from_bytes(b"80\xff"));

    let mut registry = Registry::new();
    let port = registry.int("TEST_NON_UTF8", false, 8080, "Server port");
    let label = registry.string("TEST_NON_UTF8", true, "", "Label");

    let err = registry.parse().unwrap_err();
    unset_env("TEST_NON_UTF8");

    assert_eq!(err.len(), 1);
    assert_eq!(
        err.to_string(),
        "expected: TEST_NON_UTF8 type: integer got: 80\u{FFFD}"
    );
    assert_eq!(port.get(), None);
    assert_eq!(label.get().as_deref(), Some("80\u{FFFD}"));
}
