//! Integration-level unit tests for the SettingsEngine public API.
//!
//! These tests exercise the SettingsEngine through its public trait
//! interface, validating default loading, persistence, merging, and reset
//! behavior.

use readescape::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use readescape::types::settings::{ReadingModeConfig, ReadingSettings};
use tempfile::TempDir;

/// Helper: create a SettingsEngine backed by a temp directory that lives for
/// the duration of the test (the caller holds the `TempDir` handle).
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Some(path))
}

/// When no config file exists on disk, `load()` must return the built-in
/// defaults so the engine can start with sensible values.
#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(
        settings,
        ReadingSettings::default(),
        "Loading without a config file must return default settings"
    );
}

/// After `update`, the change must be persisted to disk so that a completely
/// new SettingsEngine instance reading the same file sees it.
#[test]
fn test_update_persists_changes() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        let mut settings = ReadingSettings::default();
        settings.reading_modes.push(ReadingModeConfig {
            name: "Wide".to_string(),
            width: 1100,
            enabled: true,
        });
        settings.grayout_amount = 0.35;
        engine.update(settings).unwrap();
    }

    let mut engine = engine_in_temp(&dir);
    let loaded = engine.load().unwrap();
    assert_eq!(loaded.reading_modes.len(), 2);
    assert_eq!(loaded.reading_modes[1].name, "Wide");
    assert_eq!(loaded.grayout_amount, 0.35);
}

/// A partial settings document merges over the defaults field by field
/// instead of zeroing the missing fields.
#[test]
fn test_partial_document_merges_over_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{"preserveComments": false, "grayoutAmount": 0.5}"#,
    )
    .unwrap();

    let mut engine = engine_in_temp(&dir);
    let loaded = engine.load().unwrap();

    assert!(!loaded.preserve_comments);
    assert_eq!(loaded.grayout_amount, 0.5);
    // Missing fields fall back to defaults.
    assert_eq!(loaded.min_content_length, 100);
    assert_eq!(loaded.reading_modes.len(), 1);
    assert!(!loaded.exclude_selectors.is_empty());
}

/// The stored document uses camelCase keys on disk.
#[test]
fn test_on_disk_shape_is_camel_case() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();
    engine.update(ReadingSettings::default()).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
    assert!(raw.contains("\"readingModes\""));
    assert!(raw.contains("\"minContentLength\""));
    assert!(raw.contains("\"grayoutBackground\""));
    assert!(!raw.contains("\"reading_modes\""));
}

/// Out-of-range values are clamped on load, so a hand-edited file cannot
/// push the engine outside its working ranges.
#[test]
fn test_load_sanitizes_out_of_range_values() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{"grayoutAmount": 5.0, "readingModes": [{"name": "Huge", "width": 99999, "enabled": true}]}"#,
    )
    .unwrap();

    let mut engine = engine_in_temp(&dir);
    let loaded = engine.load().unwrap();
    assert_eq!(loaded.grayout_amount, 1.0);
    assert_eq!(loaded.reading_modes[0].width, 1600);
}

/// A malformed file is an error and the in-memory settings stay at their
/// previous (default) values.
#[test]
fn test_load_malformed_json_is_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{ nope").unwrap();

    let mut engine = engine_in_temp(&dir);
    assert!(engine.load().is_err());
    assert_eq!(*engine.get_settings(), ReadingSettings::default());
}

/// Reset restores factory defaults in memory and on disk.
#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    let mut settings = ReadingSettings::default();
    settings.min_content_length = 5;
    engine.update(settings).unwrap();
    assert_eq!(engine.get_settings().min_content_length, 5);

    engine.reset().unwrap();
    assert_eq!(*engine.get_settings(), ReadingSettings::default());

    let mut reread = engine_in_temp(&dir);
    assert_eq!(reread.load().unwrap(), ReadingSettings::default());
}

/// Saving creates missing parent directories.
#[test]
fn test_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir
        .path()
        .join("nested")
        .join("deeper")
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    let mut engine = SettingsEngine::new(Some(path.clone()));
    engine.load().unwrap();
    engine.save().unwrap();
    assert!(std::path::Path::new(&path).exists());
}
