//! Configuration tests

use super::*;
use std::collections::HashMap;
use std::io::Write;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_nothing_is_set() {
    let config = Config::from_sources(FileConfig::default(), env_from(&[])).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.search_debounce, Duration::from_millis(300));
    assert_eq!(config.api_base_url, "https://pokeapi.co/api/v2");
}

#[test]
fn file_values_override_defaults() {
    let file: FileConfig = toml::from_str(
        r#"
        api_base_url = "http://localhost:9000/api"
        search_debounce_ms = 150
        locale = "en-US"
        "#,
    )
    .unwrap();

    let config = Config::from_sources(file, env_from(&[])).unwrap();
    assert_eq!(config.api_base_url, "http://localhost:9000/api");
    assert_eq!(config.search_debounce, Duration::from_millis(150));
    assert_eq!(config.locale, Locale::English);
    assert_eq!(config.log_filter, "info");
}

#[test]
fn env_overrides_file() {
    let file = FileConfig {
        locale: Some("en-US".to_string()),
        search_debounce_ms: Some(150),
        ..FileConfig::default()
    };
    let env = env_from(&[
        ("STOCKROOM_LOCALE", "id-ID"),
        ("STOCKROOM_DEBOUNCE_MS", "500"),
        ("STOCKROOM_LOG", "stockroom=debug"),
    ]);

    let config = Config::from_sources(file, env).unwrap();
    assert_eq!(config.locale, Locale::Indonesian);
    assert_eq!(config.search_debounce, Duration::from_millis(500));
    assert_eq!(config.log_filter, "stockroom=debug");
}

#[test]
fn rejects_bad_values() {
    let err = Config::from_sources(
        FileConfig::default(),
        env_from(&[("STOCKROOM_DEBOUNCE_MS", "soon")]),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Value { key: "STOCKROOM_DEBOUNCE_MS", .. }));

    let file = FileConfig {
        locale: Some("fr-FR".to_string()),
        ..FileConfig::default()
    };
    assert!(Config::from_sources(file, env_from(&[])).is_err());
}

#[test]
fn bad_locale_names_its_source() {
    let file = FileConfig {
        locale: Some("fr-FR".to_string()),
        ..FileConfig::default()
    };
    let err = Config::from_sources(file, env_from(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::Value { key: "locale", .. }));

    let err = Config::from_sources(
        FileConfig::default(),
        env_from(&[("STOCKROOM_LOCALE", "de-DE")]),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Value { key: "STOCKROOM_LOCALE", .. }));
    assert!(err.to_string().starts_with("invalid value for STOCKROOM_LOCALE"));

    // a valid env value shadows a bad file value
    let file = FileConfig {
        locale: Some("fr-FR".to_string()),
        ..FileConfig::default()
    };
    let config = Config::from_sources(file, env_from(&[("STOCKROOM_LOCALE", "en-US")])).unwrap();
    assert_eq!(config.locale, Locale::English);
}

#[test]
fn missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let file = Config::read_file(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(file, FileConfig::default());
}

#[test]
fn malformed_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "search_debounce_ms = \"fast\"").unwrap();

    let err = Config::read_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn unknown_keys_are_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "theme = \"dark\"").unwrap();

    assert!(matches!(
        Config::read_file(file.path()),
        Err(ConfigError::Parse { .. })
    ));
}
