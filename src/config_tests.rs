//! Tests for config loading

use super::*;
use std::io::Write;
use tempfile::TempDir;

fn write_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    (temp_dir, path)
}

#[test]
fn test_missing_file_returns_defaults_silently() {
    let temp_dir = TempDir::new().unwrap();
    let result = load_config_from(&temp_dir.path().join("nope.toml"));

    assert!(result.warning.is_none());
    assert!(result.config.finalize.enabled);
}

#[test]
fn test_valid_file_is_loaded() {
    let (_temp_dir, path) = write_config("[finalize]\npool_size = 4\n");
    let result = load_config_from(&path);

    assert!(result.warning.is_none());
    assert_eq!(result.config.finalize.pool_size, 4);
}

#[test]
fn test_zero_sizes_in_file_are_corrected_with_warning() {
    let (_temp_dir, path) = write_config("[ingest]\nwindow_size = 0\n\n[finalize]\npool_size = 0\n");
    let result = load_config_from(&path);

    assert_eq!(result.config.ingest.window_size, 1);
    assert_eq!(result.config.finalize.pool_size, 1);
    let warning = result.warning.expect("zero sizes should warn");
    assert!(warning.contains("ingest.window_size"), "got: {}", warning);
    assert!(warning.contains("finalize.pool_size"), "got: {}", warning);
}

#[test]
fn test_verify_in_file_enables_samples() {
    let (_temp_dir, path) = write_config("[finalize]\nverify = true\n");
    let result = load_config_from(&path);

    assert!(result.config.finalize.retain_samples);
    assert!(result.warning.unwrap().contains("retain_samples"));
}

#[test]
fn test_empty_cache_path_falls_back_to_default() {
    let (_temp_dir, path) = write_config("[cache]\nenabled = true\npath = \"\"\n");
    let result = load_config_from(&path);

    assert_eq!(
        result.config.cache.path,
        PathBuf::from("measurements_data_cache.bin")
    );
    assert!(result.warning.is_some());
}

#[test]
fn test_malformed_toml_falls_back_with_warning() {
    let (_temp_dir, path) = write_config("[finalize\npool_size = 4");
    let result = load_config_from(&path);

    let warning = result.warning.expect("malformed config should warn");
    assert!(warning.starts_with("Invalid config"), "got: {}", warning);
    assert_eq!(result.config.finalize.pool_size, 30);
}

#[test]
fn test_unreadable_path_falls_back_with_warning() {
    // A directory exists but cannot be read as a file
    let temp_dir = TempDir::new().unwrap();
    let result = load_config_from(temp_dir.path());

    let warning = result.warning.expect("unreadable config should warn");
    assert!(warning.starts_with("Failed to read config"), "got: {}", warning);
}

#[test]
fn test_config_path_is_consistent() {
    let path1 = get_config_path();
    let path2 = get_config_path();
    assert_eq!(path1, path2);

    let path_str = path1.to_string_lossy();
    assert!(
        path_str.ends_with("brc/config.toml") || path_str.ends_with("brc\\config.toml"),
        "Config path should end with brc/config.toml, got: {}",
        path_str
    );
}
