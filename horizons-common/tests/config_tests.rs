//! Tests for configuration file loading and environment resolution
//!
//! Environment-mutating tests run serially.

use horizons_common::config::{AppConfig, CliOverrides, TomlConfig};
use horizons_common::Error;
use serial_test::serial;
use std::io::Write;
use std::path::PathBuf;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

const ENV_VARS: &[&str] = &[
    "HORIZONS_ROOT_FOLDER",
    "HORIZONS_BIND",
    "DATABASE_URL",
    "SECRET_KEY",
    "GROQ_API_KEY",
    "HORIZONS_AI_TIMEOUT_SECS",
    "HORIZONS_ENABLE_COMMUNITY",
];

fn clear_env() {
    for name in ENV_VARS {
        std::env::remove_var(name);
    }
}

#[test]
fn test_toml_file_parses_nested_tables() {
    let file = write_config(
        r#"
        root_folder = "/srv/horizons"
        groq_api_key = "gsk_test"
        ai_timeout_secs = 10

        [locale]
        timezone = "Asia/Kolkata"

        [features]
        enable_community = false
        "#,
    );

    let config = TomlConfig::from_file(file.path()).unwrap();
    assert_eq!(config.root_folder, Some(PathBuf::from("/srv/horizons")));
    assert_eq!(config.groq_api_key.as_deref(), Some("gsk_test"));
    assert_eq!(config.ai_timeout_secs, Some(10));

    let locale = config.locale.unwrap();
    assert_eq!(locale.timezone, "Asia/Kolkata");
    assert_eq!(locale.country, "India", "Missing keys keep defaults");

    let features = config.features.unwrap();
    assert!(!features.enable_community);
    assert!(features.enable_journal);
}

#[test]
fn test_malformed_toml_is_config_error() {
    let file = write_config("root_folder = [unterminated");
    let result = TomlConfig::from_file(file.path());
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_load_reads_process_environment() {
    clear_env();
    std::env::set_var("GROQ_API_KEY", "gsk_from_env");
    std::env::set_var("SECRET_KEY", "env-secret");
    std::env::set_var("HORIZONS_ENABLE_COMMUNITY", "false");

    let file = write_config(
        r#"
        groq_api_key = "gsk_from_toml"
        bind = "0.0.0.0:8080"
        "#,
    );
    let cli = CliOverrides {
        config_file: Some(file.path().to_path_buf()),
        ..Default::default()
    };

    let config = AppConfig::load(&cli).unwrap();
    clear_env();

    assert_eq!(config.groq_api_key.as_deref(), Some("gsk_from_env"));
    assert_eq!(config.secret_key, "env-secret");
    assert_eq!(config.bind, "0.0.0.0:8080");
    assert!(!config.features.enable_community);
}

#[test]
#[serial]
fn test_load_rejects_bad_environment_value() {
    clear_env();
    std::env::set_var("HORIZONS_AI_TIMEOUT_SECS", "-3");

    let file = write_config("");
    let cli = CliOverrides {
        config_file: Some(file.path().to_path_buf()),
        ..Default::default()
    };

    let result = AppConfig::load(&cli);
    clear_env();

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_missing_explicit_config_file_is_error() {
    clear_env();
    let cli = CliOverrides {
        config_file: Some(PathBuf::from("/nonexistent/healing-horizons.toml")),
        ..Default::default()
    };
    assert!(matches!(AppConfig::load(&cli), Err(Error::Config(_))));
}
