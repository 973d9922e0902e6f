//! Integration tests for the `init` command.
//!
//! These tests verify the end-to-end behavior of the init command,
//! including the CLI interface and file system operations.

use std::process::Command;
use tempfile::TempDir;

mod common;
use common::{run_mediareq_in_dir, stdout_of};

// ============================================================================
// Init Command Integration Tests
// ============================================================================

#[test]
fn test_init_creates_mediareq_directory() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_mediareq_in_dir(temp_dir.path(), &["init", "--admin-id", "77", "--quiet"]);

    assert!(output.status.success(), "Init command should succeed");
    let mediareq_dir = temp_dir.path().join(".mediareq");
    assert!(mediareq_dir.is_dir(), ".mediareq should be a directory");
}

#[test]
fn test_init_creates_config_file() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_mediareq_in_dir(temp_dir.path(), &["init", "--admin-id", "77", "--quiet"]);
    assert!(output.status.success());

    let content = std::fs::read_to_string(temp_dir.path().join(".mediareq/config.yaml")).unwrap();
    assert!(content.contains("admin-id:"), "Got: {content}");
    assert!(content.contains("77"), "Got: {content}");
    assert!(content.contains("backend: json"), "Got: {content}");
    assert!(
        content.contains("data_file: .mediareq/requests.json"),
        "Got: {content}"
    );
}

#[test]
fn test_init_leaves_data_file_to_first_open() {
    let temp_dir = TempDir::new().unwrap();
    let data_file = temp_dir.path().join(".mediareq/requests.json");

    let output = run_mediareq_in_dir(temp_dir.path(), &["init", "--admin-id", "77", "--quiet"]);
    assert!(output.status.success());
    assert!(!data_file.exists(), "init should only write the config");

    stdout_of(&run_mediareq_in_dir(temp_dir.path(), &["list"]));
    assert_eq!(std::fs::read_to_string(&data_file).unwrap().trim(), "{}");
}

#[test]
fn test_init_trims_admin_id() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_mediareq_in_dir(temp_dir.path(), &["init", "--admin-id", " 77 ", "--quiet"]);
    assert!(output.status.success());

    let stdout = stdout_of(&run_mediareq_in_dir(temp_dir.path(), &["info"]));
    assert!(stdout.contains("Admin:     77\n"), "Got: {stdout}");
}

#[test]
fn test_init_fails_if_already_initialized() {
    let temp_dir = TempDir::new().unwrap();

    let first = run_mediareq_in_dir(temp_dir.path(), &["init", "--admin-id", "77", "--quiet"]);
    assert!(first.status.success(), "First init should succeed");

    let second = run_mediareq_in_dir(temp_dir.path(), &["init", "--admin-id", "88", "--quiet"]);
    assert!(
        !second.status.success(),
        "Second init should fail because already initialized"
    );

    let stderr = String::from_utf8_lossy(&second.stderr);
    assert!(
        stderr.contains("already initialized"),
        "Error message should indicate already initialized. Got: {stderr}"
    );
    let content = std::fs::read_to_string(temp_dir.path().join(".mediareq/config.yaml")).unwrap();
    assert!(!content.contains("88"), "config should be untouched");
}

#[test]
fn test_init_requires_admin_id() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_mediareq_in_dir(temp_dir.path(), &["init", "--quiet"]);

    assert!(!output.status.success());
    assert!(!temp_dir.path().join(".mediareq").exists());
}

#[test]
fn test_init_fails_with_whitespace_in_admin_id() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_mediareq_in_dir(temp_dir.path(), &["init", "--admin-id", "12 34"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid admin id"),
        "Error should name the admin id. Got: {stderr}"
    );
    assert!(!temp_dir.path().join(".mediareq").exists());
}

#[test]
fn test_init_output_without_quiet_flag() {
    let temp_dir = TempDir::new().unwrap();

    let stdout = stdout_of(&run_mediareq_in_dir(
        temp_dir.path(),
        &["init", "--admin-id", "77"],
    ));

    assert!(stdout.contains("Initializing mediareq repository..."));
    assert!(stdout.contains("Initialized mediareq in"));
    assert!(stdout.contains("config.yaml"));
    assert!(stdout.contains("requests.json"));
    assert!(stdout.contains("Admin:    77"));
}

#[test]
fn test_init_quiet_flag_suppresses_output() {
    let temp_dir = TempDir::new().unwrap();

    let stdout = stdout_of(&run_mediareq_in_dir(
        temp_dir.path(),
        &["init", "--admin-id", "77", "--quiet"],
    ));

    assert!(stdout.is_empty(), "Got: {stdout}");
}

#[test]
fn test_admin_id_environment_overrides_config() {
    let temp_dir = TempDir::new().unwrap();
    stdout_of(&run_mediareq_in_dir(
        temp_dir.path(),
        &["init", "--admin-id", "77", "--quiet"],
    ));

    let output = Command::new(env!("CARGO_BIN_EXE_mediareq"))
        .args(["info"])
        .current_dir(temp_dir.path())
        .env("ADMIN_ID", "555")
        .env("NO_COLOR", "1")
        .output()
        .unwrap();

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Admin:     555"), "Got: {stdout}");
}

#[test]
fn test_config_with_unknown_backend_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let mediareq_dir = temp_dir.path().join(".mediareq");
    std::fs::create_dir_all(&mediareq_dir).unwrap();
    std::fs::write(
        mediareq_dir.join("config.yaml"),
        "admin-id: '77'\nstorage:\n  backend: postgres\n  data_file: .mediareq/requests.json\n",
    )
    .unwrap();

    let output = run_mediareq_in_dir(temp_dir.path(), &["list"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("postgres"), "Got: {stderr}");
}

#[test]
fn test_memory_backend_keeps_nothing_between_runs() {
    let temp_dir = TempDir::new().unwrap();
    let mediareq_dir = temp_dir.path().join(".mediareq");
    std::fs::create_dir_all(&mediareq_dir).unwrap();
    std::fs::write(
        mediareq_dir.join("config.yaml"),
        "admin-id: '77'\nstorage:\n  backend: memory\n  data_file: .mediareq/requests.json\n",
    )
    .unwrap();

    stdout_of(&run_mediareq_in_dir(
        temp_dir.path(),
        &["request", "--title", "Dune"],
    ));
    let stdout = stdout_of(&run_mediareq_in_dir(temp_dir.path(), &["list"]));

    assert!(stdout.contains("No requests found."));
    assert!(!mediareq_dir.join("requests.json").exists());
}
