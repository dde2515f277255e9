use clap::Parser;
use clonex::cli::{Cli, OutputFormat};
use clonex::config::{CliOverrides, Config};
use clonex::scanner::HashAlgorithm;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::{tempdir, TempDir};

// Config::load reads CLONEX_* variables, so tests touching them run one at a time
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_KEYS: [&str; 3] = [
    "CLONEX_ALGORITHM",
    "CLONEX_OUTPUT",
    "CLONEX_PROGRESS_INTERVAL",
];

fn clear_env() {
    for key in ENV_KEYS {
        env::remove_var(key);
    }
}

fn write_config(dir: &TempDir, table: toml::Table) -> PathBuf {
    let path = dir.path().join("clonex.toml");
    fs::write(&path, toml::to_string(&table).unwrap()).unwrap();
    path
}

fn sample_table() -> toml::Table {
    let mut table = toml::Table::new();
    table.insert("algorithm".into(), "blake3".into());
    table.insert("output".into(), "json".into());
    table.insert("progress_interval".into(), toml::Value::Integer(25));
    table.insert("skip_hidden".into(), true.into());
    table.insert(
        "ignore_patterns".into(),
        toml::Value::Array(vec!["*.tmp".into(), "build/".into()]),
    );
    table
}

#[test]
fn test_defaults_without_file() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let config = Config::load(None, &CliOverrides::default()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_file_values_are_loaded() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let dir = tempdir().unwrap();
    let path = write_config(&dir, sample_table());

    let config = Config::load(Some(&path), &CliOverrides::default()).unwrap();
    assert_eq!(config.algorithm, HashAlgorithm::Blake3);
    assert_eq!(config.output, OutputFormat::Json);
    assert_eq!(config.progress_interval, 25);
    assert!(config.skip_hidden);
    assert_eq!(config.ignore_patterns, vec!["*.tmp", "build/"]);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let dir = tempdir().unwrap();
    let mut table = toml::Table::new();
    table.insert("output".into(), "csv".into());
    let path = write_config(&dir, table);

    let config = Config::load(Some(&path), &CliOverrides::default()).unwrap();
    assert_eq!(config.output, OutputFormat::Csv);
    assert_eq!(config.algorithm, HashAlgorithm::Sha256);
    assert_eq!(config.progress_interval, 100);
}

#[test]
fn test_env_overrides_file() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let dir = tempdir().unwrap();
    let path = write_config(&dir, sample_table());

    env::set_var("CLONEX_ALGORITHM", "sha256");
    env::set_var("CLONEX_PROGRESS_INTERVAL", "10");
    let result = Config::load(Some(&path), &CliOverrides::default());
    clear_env();

    let config = result.unwrap();
    assert_eq!(config.algorithm, HashAlgorithm::Sha256);
    assert_eq!(config.progress_interval, 10);
    assert_eq!(config.output, OutputFormat::Json);
}

#[test]
fn test_cli_overrides_env_and_file() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let dir = tempdir().unwrap();
    let path = write_config(&dir, sample_table());

    env::set_var("CLONEX_OUTPUT", "csv");
    let cli = Cli::parse_from([
        "clonex",
        "--output",
        "text",
        "--algorithm",
        "sha256",
        "--progress-interval",
        "3",
    ]);
    let result = Config::load(Some(&path), &CliOverrides::from(&cli));
    clear_env();

    let config = result.unwrap();
    assert_eq!(config.output, OutputFormat::Text);
    assert_eq!(config.algorithm, HashAlgorithm::Sha256);
    assert_eq!(config.progress_interval, 3);
    // Unset flags leave the file values alone
    assert!(config.skip_hidden);
    assert_eq!(config.ignore_patterns, vec!["*.tmp", "build/"]);
}

#[test]
fn test_cli_ignore_patterns_replace_file_patterns() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let dir = tempdir().unwrap();
    let path = write_config(&dir, sample_table());

    let cli = Cli::parse_from(["clonex", "-i", "*.log"]);
    let config = Config::load(Some(&path), &CliOverrides::from(&cli)).unwrap();
    assert_eq!(config.ignore_patterns, vec!["*.log"]);
}

#[test]
fn test_zero_interval_is_clamped() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let cli = Cli::parse_from(["clonex", "--progress-interval", "0"]);
    let config = Config::load(None, &CliOverrides::from(&cli)).unwrap();
    assert_eq!(config.progress_interval, 1);
}

#[test]
fn test_invalid_value_is_error() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let dir = tempdir().unwrap();
    let mut table = toml::Table::new();
    table.insert("algorithm".into(), "md5".into());
    let path = write_config(&dir, table);

    assert!(Config::load(Some(&path), &CliOverrides::default()).is_err());
}

#[test]
fn test_missing_file_is_error() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let err = Config::load(
        Some(Path::new("/definitely/not/here.toml")),
        &CliOverrides::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
}
