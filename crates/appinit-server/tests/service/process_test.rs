//! Fatal bootstrap errors in the server binary

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_server(config_path: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_appinit-server"))
        .arg("--config")
        .arg(config_path)
        .env_remove("APPINIT_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to spawn appinit-server: {e}"))
}

#[test]
fn test_malformed_transport_terminates_with_status_one() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("appinit.toml");
    std::fs::write(
        &config_path,
        r#"
[service]
name = "hello"

[logging]
level = "info"

[transport]
inbounds = [{ address = "nowhere" }]
"#,
    )
    .unwrap();

    let output = run_server(&config_path);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    // Exited from inside start, before main could report the error
    assert!(stdout.contains("Failed to build dispatcher"), "stdout: {stdout}");
    assert!(!stderr.contains("Error:"), "stderr: {stderr}");
}

#[test]
fn test_missing_config_file_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_server(&temp_dir.path().join("absent.toml"));

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Configuration file not found"));
}
