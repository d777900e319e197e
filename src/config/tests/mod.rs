//! Unit tests for config module
//!
//! Tests configuration types, defaults, validation and serialization.
//! No filesystem dependencies - all in-memory.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

use crate::PlaybarError;
use crate::config::{Config, LogLevel, PlayerConfig};

#[test]
fn config_default() {
    let config = Config::default();

    assert_eq!(config.general.log_level, LogLevel::Info);
    assert!(config.player.source.is_empty());
    assert!(!config.player.auto_play);
    assert!(!config.player.muted);
    assert_eq!(config.player.title, None);
    assert_eq!(config.player.poster, None);
}

#[test]
fn config_deserialize_toml() {
    let toml_str = r#"
        [general]
        log_level = "debug"

        [player]
        source = "/video/Obiwan.mp4"
        auto_play = true
        muted = true
        title = "Obi-Wan"
        poster = "/images/obiwan.jpg"
    "#;

    let config = Config::from_toml_str(toml_str).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert_eq!(config.player.source, "/video/Obiwan.mp4");
    assert!(config.player.auto_play);
    assert!(config.player.muted);
    assert_eq!(config.player.title.as_deref(), Some("Obi-Wan"));
    assert_eq!(config.player.poster.as_deref(), Some("/images/obiwan.jpg"));
}

#[test]
fn config_minimal_toml_uses_defaults() {
    let minimal_toml = r#"
        [player]
        source = "https://media.example.com/clip.webm"
    "#;

    let config = Config::from_toml_str(minimal_toml).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Info);
    assert!(!config.player.auto_play);
    assert!(!config.player.muted);
}

#[test]
fn config_missing_source_fails_validation() {
    let err = Config::from_toml_str("[general]\nlog_level = \"warn\"\n").unwrap_err();

    match err {
        PlaybarError::InvalidConfigField {
            field, component, ..
        } => {
            assert_eq!(field, "source");
            assert_eq!(component, "player");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn config_malformed_source_fails_validation() {
    let err = Config::from_toml_str("[player]\nsource = \"my video.mp4\"\n").unwrap_err();

    assert!(matches!(err, PlaybarError::InvalidConfigField { .. }));
}

#[test]
fn config_invalid_toml_reports_string_location() {
    let err = Config::from_toml_str("[player\nsource = 1").unwrap_err();

    match err {
        PlaybarError::TomlParseError { location, .. } => assert_eq!(location, "string"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn config_unknown_log_level_is_rejected() {
    let toml_str = r#"
        [general]
        log_level = "loud"

        [player]
        source = "/video/a.mp4"
    "#;

    assert!(Config::from_toml_str(toml_str).is_err());
}

#[test]
fn config_serialize_roundtrip() {
    let original = Config {
        player: PlayerConfig {
            title: Some("Trailer".to_string()),
            ..PlayerConfig::new("/video/trailer.mp4")
        },
        ..Config::default()
    };

    let toml_str = original.to_toml_string().unwrap();
    assert!(toml_str.contains("[general]"));
    assert!(toml_str.contains("[player]"));
    assert!(!toml_str.contains("poster"));

    let deserialized = Config::from_toml_str(&toml_str).unwrap();
    assert_eq!(original, deserialized);
}
