use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary config directory
fn temp_config_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp dir
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".admin-panel").join("config.json")
}

/// Writes a small users table as a JSON array of records.
fn users_file(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("users.json");
    fs::write(
        &path,
        r#"[
            {"user_id": 1, "username": "Alice", "level": "Level3"},
            {"user_id": 2, "username": "Bob, Jr.", "level": "Level1"}
        ]"#,
    )
    .unwrap();
    path
}

const BINARY_NAME: &str = "admin-panel";

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Command-line arguments"));
}

#[test]
/// Export should write a dated CSV file into the output directory.
fn export_writes_csv_file() {
    let tmp = temp_config_dir();
    let input = users_file(&tmp);
    let out_dir = tmp.path().join("exports");

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("export")
        .arg("--input")
        .arg(&input)
        .arg("--out-dir")
        .arg(&out_dir)
        .env("HOME", tmp.path()) // simulate different $HOME
        .assert()
        .success()
        .stdout(contains("Exported data to telegram_bot_data_"));

    let files: Vec<PathBuf> = fs::read_dir(&out_dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].extension().unwrap(), "csv");

    let content = fs::read_to_string(&files[0]).unwrap();
    assert_eq!(
        content,
        "user_id,username,level\n1,Alice,Level3\n2,\"Bob, Jr.\",Level1"
    );
}

#[test]
/// Exporting an empty dataset should warn and write nothing.
fn export_of_empty_dataset_fails() {
    let tmp = temp_config_dir();
    let input = tmp.path().join("empty.json");
    fs::write(&input, "[]").unwrap();
    let out_dir = tmp.path().join("exports");

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("export")
        .arg("--input")
        .arg(&input)
        .arg("--format")
        .arg("json")
        .arg("--out-dir")
        .arg(&out_dir)
        .env("HOME", tmp.path())
        .assert()
        .failure()
        .stdout(contains("No data available to export"));

    assert!(!out_dir.exists());
}

#[test]
/// Search with a term should print matching rows and the results counter.
fn search_with_term_prints_counter() {
    let tmp = temp_config_dir();
    let input = users_file(&tmp);

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("search")
        .arg("--input")
        .arg(&input)
        .arg("--term")
        .arg("LEVEL3")
        .env("HOME", tmp.path())
        .assert()
        .success()
        .stdout(contains("Alice"))
        .stdout(contains("1 of 2"));
}

#[test]
/// Configure should save the settings to the config file.
fn configure_creates_config_file() {
    let tmp = temp_config_dir();
    let config_path = config_file_path(&tmp);
    assert!(!config_path.exists());

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("configure")
        .arg("--api-url")
        .arg("http://panel.local:5000")
        .arg("--analytics-days")
        .arg("7")
        .env("HOME", tmp.path())
        .assert()
        .success();

    let saved = fs::read_to_string(&config_path).unwrap();
    assert!(saved.contains("http://panel.local:5000"));
    assert!(saved.contains("\"analytics_days\": 7"));
}

#[test]
/// Configure should reject a URL that isn't http(s).
fn configure_rejects_invalid_url() {
    let tmp = temp_config_dir();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("configure")
        .arg("--api-url")
        .arg("panel.local")
        .env("HOME", tmp.path())
        .assert()
        .failure();

    assert!(!config_file_path(&tmp).exists());
}

#[test]
/// Reset command should delete an existing config file.
fn reset_deletes_config_file() {
    let tmp = temp_config_dir();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, "{}").unwrap();

    // Ensure the file exists
    assert!(config_path.exists());

    // Run the command
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("reset")
        .env("HOME", tmp.path()) // simulate different $HOME
        .assert()
        .success()
        .stdout(contains("Clearing"));

    // Confirm the file was deleted
    assert!(!config_path.exists());
}

#[test]
/// Configure should refuse a refresh interval the timer can't run with.
fn configure_rejects_zero_refresh_interval() {
    let tmp = temp_config_dir();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("configure")
        .arg("--api-url")
        .arg("http://panel.local:5000")
        .arg("--refresh-interval-secs")
        .arg("0")
        .env("HOME", tmp.path())
        .assert()
        .failure()
        .stdout(contains("refresh_interval_secs"));

    assert!(!config_file_path(&tmp).exists());
}

#[test]
/// A saved config with an out-of-range interval should stop watch before it starts.
fn watch_rejects_saved_zero_refresh_interval() {
    let tmp = temp_config_dir();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, r#"{"refresh_interval_secs": 0}"#).unwrap();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("watch")
        .env("HOME", tmp.path())
        .assert()
        .failure()
        .stderr(contains("refresh_interval_secs"));
}

#[test]
/// Terms piped on stdin should end with the last one applied.
fn search_from_stdin_applies_last_term() {
    let tmp = temp_config_dir();
    let input = users_file(&tmp);

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("search")
        .arg("--input")
        .arg(&input)
        .env("HOME", tmp.path())
        .write_stdin("alice\nbob\n")
        .assert()
        .success()
        .stdout(contains("* 2 Bob, Jr. Level1"))
        .stdout(contains("1 of 2"))
        .stdout(contains("Alice").not());
}

#[test]
/// Search with a column should only match that field.
fn search_by_column_matches_one_field() {
    let tmp = temp_config_dir();
    let input = users_file(&tmp);

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("search")
        .arg("--input")
        .arg(&input)
        .arg("--term")
        .arg("1")
        .arg("--column")
        .arg("level")
        .env("HOME", tmp.path())
        .assert()
        .success()
        .stdout(contains("Bob"))
        .stdout(contains("1 of 2"));
}
