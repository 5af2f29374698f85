//! Configuration tests
//!
//! These tests guard the config file format: every field must be written by
//! `to_toml()` and read back through `FileConfig`. When you add a new field,
//! these tests will fail until you update all the necessary places.

use super::*;

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// Verify that serialized config can be parsed back.
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
}

/// EXHAUSTIVE TEST: Ensures every augmentation toggle is serialized to TOML.
///
/// When you add a new menu rule toggle:
/// 1. Add the field to `Augmentation` and `FileAugmentation`
/// 2. Add merge logic in `Augmentation::from_file()`
/// 3. THIS TEST WILL FAIL until you set it below and serialize it in `to_toml()`
#[test]
fn test_all_augmentation_toggles_have_toml_serialization() {
    let mut config = Config::default();
    config.augmentation.quest_guides = false;
    config.augmentation.diary_prices = false;
    config.augmentation.skill_prices = false;
    config.augmentation.suppress_unsupported_widgets = false;

    let toml_str = config.to_toml();

    for key in [
        "quest_guides = false",
        "diary_prices = false",
        "skill_prices = false",
        "suppress_unsupported_widgets = false",
    ] {
        assert!(
            toml_str.contains(key),
            "{} missing from TOML output!\nDid you forget to serialize it in to_toml()?",
            key
        );
    }

    let file_config: FileConfig = toml::from_str(&toml_str).unwrap();
    let aug = Augmentation::from_file(file_config.augmentation);
    assert!(!aug.quest_guides);
    assert!(!aug.diary_prices);
    assert!(!aug.skill_prices);
    assert!(!aug.suppress_unsupported_widgets);
}

#[test]
fn test_logging_roundtrip() {
    let mut config = Config::default();
    config.logging.level = "debug".to_string();
    config.logging.file_enabled = true;
    config.logging.file_dir = PathBuf::from("/tmp/lookup-logs");
    config.logging.file_rotation = LogRotation::Hourly;
    config.logging.file_prefix = "lookup".to_string();

    let file_config: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    let logging = LoggingConfig::from_file(file_config.logging);

    assert_eq!(logging.level, "debug");
    assert!(logging.file_enabled);
    assert_eq!(logging.file_dir, PathBuf::from("/tmp/lookup-logs"));
    assert_eq!(logging.file_rotation, LogRotation::Hourly);
    assert_eq!(logging.file_prefix, "lookup");
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_gives_defaults() {
    let file: FileConfig = toml::from_str("").unwrap();
    let config = Config::merge(file, None);

    assert_eq!(config.lookup_base_url, crate::plugin::LOOKUP_BASE_URL);
    assert!(config.augmentation.quest_guides);
    assert!(config.augmentation.suppress_unsupported_widgets);
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.file_enabled);
}

#[test]
fn test_file_overrides_default_base_url() {
    let file: FileConfig = toml::from_str(r#"lookup_base_url = "http://localhost:8000/item""#).unwrap();
    let config = Config::merge(file, None);
    assert_eq!(config.lookup_base_url, "http://localhost:8000/item");
}

#[test]
fn test_env_overrides_file_base_url() {
    let file: FileConfig = toml::from_str(r#"lookup_base_url = "http://file/item""#).unwrap();
    let config = Config::merge(file, Some("http://env/item".to_string()));
    assert_eq!(config.lookup_base_url, "http://env/item");
}

#[test]
fn test_blank_env_ignored() {
    let file: FileConfig = toml::from_str(r#"lookup_base_url = "http://file/item""#).unwrap();
    let config = Config::merge(file, Some("  ".to_string()));
    assert_eq!(config.lookup_base_url, "http://file/item");
}

#[test]
fn test_blank_file_base_url_ignored() {
    let file: FileConfig = toml::from_str(r#"lookup_base_url = " ""#).unwrap();
    let config = Config::merge(file, None);
    assert_eq!(config.lookup_base_url, crate::plugin::LOOKUP_BASE_URL);
}

#[test]
fn test_base_url_with_quotes_roundtrips() {
    let mut config = Config::default();
    config.lookup_base_url = r#"http://host/it"em\path"#.to_string();

    let file: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    assert_eq!(
        file.lookup_base_url.as_deref(),
        Some(r#"http://host/it"em\path"#)
    );
}

#[test]
fn test_partial_augmentation_section() {
    let file: FileConfig = toml::from_str(
        r#"
[augmentation]
skill_prices = false
"#,
    )
    .unwrap();
    let config = Config::merge(file, None);
    assert!(config.augmentation.quest_guides);
    assert!(config.augmentation.diary_prices);
    assert!(!config.augmentation.skill_prices);
}

#[test]
fn test_unknown_rotation_falls_back_to_daily() {
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
    assert_eq!(LogRotation::parse("never"), LogRotation::Never);
}
