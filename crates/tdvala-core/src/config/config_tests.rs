#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn EmitSettings___default___uses_tdlib_names() {
    let settings = EmitSettings::default();

    assert_eq!(settings.namespace, "TDLib");
    assert_eq!(settings.client_class, "Client");
    assert_eq!(settings.dispatcher_class, "RequestsManager");
    assert_eq!(settings.error_type, "Error");
    assert_eq!(settings.root_class, "TDObject");
    assert_eq!(settings.year, None);
}

#[test]
fn EmitSettings___from_json___fills_missing_fields() {
    let settings: EmitSettings =
        serde_json::from_str(r#"{"namespace": "Td", "author": "Jane Doe"}"#).unwrap();

    assert_eq!(settings.namespace, "Td");
    assert_eq!(settings.author, "Jane Doe");
    assert_eq!(settings.license, "GPL-3.0-or-later");
    assert_eq!(settings.root_class, "TDObject");
}

#[test]
fn EmitSettings___builders___override_fields() {
    let settings = EmitSettings::default()
        .with_namespace("Telegram")
        .with_author("Someone")
        .with_year(2031);

    assert_eq!(settings.namespace, "Telegram");
    assert_eq!(settings.author, "Someone");
    assert_eq!(settings.year, Some(2031));
}

#[test_case("trace", LogLevel::Trace)]
#[test_case("DEBUG", LogLevel::Debug)]
#[test_case("info", LogLevel::Info)]
#[test_case("warning", LogLevel::Warn)]
#[test_case("error", LogLevel::Error)]
#[test_case("off", LogLevel::Off)]
fn LogLevel___from_str___parses(input: &str, expected: LogLevel) {
    assert_eq!(input.parse::<LogLevel>(), Ok(expected));
}

#[test]
fn LogLevel___from_str___rejects_unknown() {
    assert!("loud".parse::<LogLevel>().is_err());
}

#[test]
fn LogLevel___display___roundtrips_through_from_str() {
    for level in [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Off,
    ] {
        assert_eq!(level.to_string().parse::<LogLevel>(), Ok(level));
    }
}

#[test]
fn LogLevel___ordering___trace_is_most_verbose() {
    assert!(LogLevel::Trace < LogLevel::Debug);
    assert!(LogLevel::Warn < LogLevel::Error);
    assert!(LogLevel::Error < LogLevel::Off);
}
