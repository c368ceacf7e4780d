//! Configuration system tests

use carve::config::EditorConfig;
use carve::config_paths;
use tempfile::TempDir;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_file_is_yaml_in_app_dir() {
    if let Some(file) = config_paths::config_file() {
        assert!(file.ends_with("carve/config.yaml"));
    }
}

#[test]
fn test_logs_dir_is_under_config_dir() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(config));
    }
}

// ========================================================================
// EditorConfig Tests
// ========================================================================

#[test]
fn test_defaults() {
    let config = EditorConfig::default();
    assert_eq!(config.undo_limit, 1000);
    assert!(config.backup);
    assert_eq!(config.initial_capacity, 4096);
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.yaml");
    let config = EditorConfig {
        undo_limit: 5,
        backup: false,
        initial_capacity: 64,
    };
    config.save_to(&path).unwrap();
    assert_eq!(EditorConfig::load_from(&path), config);
}

#[test]
fn test_partial_yaml_uses_defaults_for_missing_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "backup: false\n").unwrap();

    let config = EditorConfig::load_from(&path);
    assert!(!config.backup);
    assert_eq!(config.undo_limit, 1000);
}

#[test]
fn test_malformed_yaml_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "undo_limit: [not a number\n").unwrap();
    assert_eq!(EditorConfig::load_from(&path), EditorConfig::default());
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    assert_eq!(
        EditorConfig::load_from(&dir.path().join("absent.yaml")),
        EditorConfig::default()
    );
}

#[test]
fn test_new_buffer_honours_undo_limit() {
    let config = EditorConfig {
        undo_limit: 2,
        ..EditorConfig::default()
    };
    let mut buffer = config.new_buffer();
    for c in b"abcd" {
        buffer.insert_char(*c);
    }
    assert_eq!(buffer.undo_count(), 2);
    buffer.undo().unwrap();
    buffer.undo().unwrap();
    assert_eq!(buffer.to_string(), "ab");
}
