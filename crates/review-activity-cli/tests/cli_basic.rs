//! Basic CLI E2E tests.
//!
//! Tests run the compiled `plot_activity` binary inside a temporary working
//! directory, with the review API replaced by a mockito server.

use std::path::Path;
use std::process::Command;

use chrono::{Duration, Utc};

const COMPLETED_PATH: &str = "/me/submissions/completed/";
const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Run the CLI in `dir` and return (exit code, stdout, stderr).
fn run_cli(dir: &Path, args: &[&str], env_token: Option<&str>) -> (i32, String, String) {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_plot_activity"));
    cmd.current_dir(dir).args(args).env_remove("RUST_LOG");
    for var in ["HTTP_PROXY", "http_proxy", "HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"] {
        cmd.env_remove(var);
    }
    match env_token {
        Some(token) => cmd.env("UDACITY_AUTH_TOKEN", token),
        None => cmd.env_remove("UDACITY_AUTH_TOKEN"),
    };
    let output = cmd.output().expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

/// Write a config file pointing the client at `base_url`, in UTC.
fn write_config(dir: &Path, base_url: &str) -> String {
    let path = dir.join("config.toml");
    std::fs::write(
        &path,
        format!("api_base_url = \"{base_url}\"\ntimezone = \"UTC\"\n"),
    )
    .unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_help() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["--help"], None);
    assert_eq!(code, 0, "help failed");
    assert!(stdout.contains("--auth-token"));
    assert!(stdout.contains("--debug"));
    assert!(stdout.contains("UDACITY_AUTH_TOKEN"));
}

#[test]
fn test_missing_token_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", COMPLETED_PATH).expect(0).create();
    let config = write_config(dir.path(), &server.url());

    let (code, _, stderr) = run_cli(dir.path(), &["--config", &config], None);
    assert_eq!(code, 2, "missing token should exit with usage error");
    assert!(stderr.contains("UDACITY_AUTH_TOKEN"));
    assert!(!dir.path().join("activity.png").exists());
    mock.assert();
}

#[test]
fn test_empty_env_token_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &[], Some(""));
    assert_eq!(code, 2);
    assert!(!dir.path().join("activity.png").exists());
}

#[test]
fn test_plot_writes_png_and_json() {
    let dir = tempfile::tempdir().unwrap();
    let recent = (Utc::now() - Duration::minutes(1)).to_rfc3339();
    let body = format!(
        r#"[
            {{"id": 1, "completed_at": "{recent}", "price": "35.0"}},
            {{"id": 2, "completed_at": "2001-01-01T00:00:00Z", "price": "99.0"}}
        ]"#
    );

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", COMPLETED_PATH)
        .match_header("authorization", "secret-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create();
    let config = write_config(dir.path(), &server.url());

    let (code, stdout, stderr) = run_cli(
        dir.path(),
        &["-T", "secret-token", "--config", &config, "--days", "30", "--json"],
        None,
    );
    assert_eq!(code, 0, "plot failed: {stderr}");
    mock.assert();

    let series: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let days = series.as_array().unwrap();
    assert_eq!(days.len(), 30);
    let total: f64 = days.iter().map(|d| d["points"].as_f64().unwrap()).sum();
    assert_eq!(total, 35.0);

    let png = std::fs::read(dir.path().join("activity.png")).unwrap();
    assert!(png.starts_with(PNG_SIGNATURE));
}

#[test]
fn test_plot_overwrites_existing_output_with_env_token() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("activity.png");
    std::fs::write(&out, b"old image").unwrap();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", COMPLETED_PATH)
        .match_header("authorization", "env-token")
        .with_status(200)
        .with_body("[]")
        .create();
    let config = write_config(dir.path(), &server.url());

    let (code, _, stderr) = run_cli(dir.path(), &["--config", &config, "--ascii"], Some("env-token"));
    assert_eq!(code, 0, "plot failed: {stderr}");
    mock.assert();

    let png = std::fs::read(&out).unwrap();
    assert!(png.starts_with(PNG_SIGNATURE));
    let entries = std::fs::read_dir(dir.path())
        .unwrap()
        .filter(|e| {
            e.as_ref()
                .map(|e| e.path().extension().is_some_and(|x| x == "png"))
                .unwrap_or(false)
        })
        .count();
    assert_eq!(entries, 1);
}

#[test]
fn test_custom_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", COMPLETED_PATH)
        .with_status(200)
        .with_body("[]")
        .create();
    let config = write_config(dir.path(), &server.url());

    let (code, _, stderr) = run_cli(
        dir.path(),
        &["-T", "tok", "--config", &config, "-o", "gains.png"],
        None,
    );
    assert_eq!(code, 0, "plot failed: {stderr}");
    assert!(dir.path().join("gains.png").exists());
    assert!(!dir.path().join("activity.png").exists());
}

#[test]
fn test_rejected_token_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", COMPLETED_PATH)
        .with_status(401)
        .with_body(r#"{"error": "unauthorized"}"#)
        .create();
    let config = write_config(dir.path(), &server.url());

    let (code, _, stderr) = run_cli(dir.path(), &["-T", "bad", "--config", &config], None);
    assert_eq!(code, 1);
    assert!(stderr.contains("Authentication failed"), "stderr: {stderr}");
    assert!(!dir.path().join("activity.png").exists());
}

#[test]
fn test_malformed_body_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", COMPLETED_PATH)
        .with_status(200)
        .with_body("not json")
        .create();
    let config = write_config(dir.path(), &server.url());

    let (code, _, stderr) = run_cli(dir.path(), &["-T", "tok", "--config", &config], None);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unexpected response"), "stderr: {stderr}");
    assert!(!dir.path().join("activity.png").exists());
}

#[test]
fn test_unknown_timezone_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "http://127.0.0.1:9");

    let (code, _, stderr) = run_cli(
        dir.path(),
        &["-T", "tok", "--config", &config, "--timezone", "Mars/Olympus"],
        None,
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("timezone"), "stderr: {stderr}");
}

#[test]
fn test_zero_days_is_rejected_by_parser() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["-T", "tok", "--days", "0"], None);
    assert_eq!(code, 2);
}

#[test]
fn test_huge_days_is_rejected_before_any_request() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", COMPLETED_PATH).expect(0).create();
    let config = write_config(dir.path(), &server.url());

    let (code, _, stderr) = run_cli(
        dir.path(),
        &["-T", "tok", "--config", &config, "--days", "100000000"],
        None,
    );
    assert_eq!(code, 2, "stderr: {stderr}");
    assert!(!dir.path().join("activity.png").exists());
    mock.assert();
}

#[test]
fn test_oversized_window_in_config_fails_before_any_request() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", COMPLETED_PATH).expect(0).create();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        format!("api_base_url = \"{}\"\nwindow_days = 100000000\n", server.url()),
    )
    .unwrap();

    let (code, _, stderr) = run_cli(
        dir.path(),
        &["-T", "tok", "--config", path.to_str().unwrap()],
        None,
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("window_days"), "stderr: {stderr}");
    assert!(!dir.path().join("activity.png").exists());
    mock.assert();
}
