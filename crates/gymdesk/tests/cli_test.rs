//! Integration tests for the `gymdesk` CLI binary.
//!
//! Argument parsing, help, completions and error exits run without a
//! backend; the rest talk to a wiremock stand-in.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `gymdesk` binary with env isolation.
///
/// Clears all `GYMDESK_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn gymdesk_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("gymdesk");
    cmd.env("HOME", "/tmp/gymdesk-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/gymdesk-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("GYMDESK_PROFILE")
        .env_remove("GYMDESK_SERVER")
        .env_remove("GYMDESK_TOKEN")
        .env_remove("GYMDESK_OUTPUT")
        .env_remove("GYMDESK_INSECURE")
        .env_remove("GYMDESK_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run `gymdesk` against `server` with a token, as of 2025-11-10.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let mut cmd = gymdesk_cmd();
    cmd.args(["--server", &format!("{}/api", server.uri())])
        .args(["--token", "tok", "--as-of", "2025-11-10"])
        .args(args);
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

/// Backend with one plan and four members around 2025-11-10.
async fn backend() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/plans"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 2, "planName": "Quarterly", "durationInMonths": 3, "price": 2400}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/members"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Meera", "phone": "99001", "planId": 2,
             "startDate": "2025-08-12", "endDate": "2025-11-12"},
            {"id": 2, "name": "Kiran", "phone": "99002", "planId": 2,
             "startDate": "2025-08-01", "endDate": "2025-11-01T00:00:00"},
            {"id": 3, "name": "Arjun", "phone": "99003", "planId": 2,
             "startDate": "2025-08-16", "endDate": "2025-11-16T18:30:00Z"},
            {"id": 4, "name": "Zoya", "phone": "99004", "planId": 2,
             "startDate": "2025-10-01", "endDate": "2026-01-01"}
        ])))
        .mount(&server)
        .await;

    server
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = gymdesk_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    gymdesk_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("gym membership")
            .and(predicate::str::contains("dashboard"))
            .and(predicate::str::contains("members"))
            .and(predicate::str::contains("plans")),
    );
}

#[test]
fn test_version_flag() {
    gymdesk_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gymdesk"));
}

#[test]
fn test_completions_bash() {
    gymdesk_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    gymdesk_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = gymdesk_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_bad_status_filter_is_a_usage_error() {
    let output = gymdesk_cmd()
        .args(["members", "list", "--status", "overdue"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_bad_as_of_date_is_a_usage_error() {
    let output = gymdesk_cmd()
        .args(["--token", "tok", "--as-of", "10/11/2025", "dashboard"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("as-of"));
}

#[test]
fn test_unknown_profile_is_reported() {
    let output = gymdesk_cmd()
        .args(["--profile", "branch-9", "dashboard"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("branch-9"));
}

#[test]
fn test_config_show_without_file() {
    gymdesk_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("expiry_window_days = 7"));
}

// ── Against a backend ───────────────────────────────────────────────

#[tokio::test]
async fn test_dashboard_json() {
    let server = backend().await;
    let output = run_against(&server, &["dashboard", "-o", "json"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let dash: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(dash["today"], "2025-11-10");
    assert_eq!(dash["window_days"], 7);
    assert_eq!(dash["summary"]["total_members"], 4);
    assert_eq!(dash["summary"]["active_members"], 3);
    assert_eq!(dash["summary"]["expired_members"], 1);
    assert_eq!(dash["summary"]["total_plans"], 1);

    let expiring: Vec<&str> = dash["expiring"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(expiring, ["Meera", "Arjun"]);
}

#[tokio::test]
async fn test_dashboard_table() {
    let server = backend().await;
    let output = run_against(&server, &["dashboard", "--days", "3"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("Members: 4   Active: 3   Expired: 1   Plans: 1"), "{text}");
    assert!(text.contains("Meera"));
    assert!(text.contains("2 days"));
    assert!(!text.contains("Arjun"), "Arjun ends in 6 days:\n{text}");
}

#[tokio::test]
async fn test_members_list_status_filter() {
    let server = backend().await;
    let args = ["members", "list", "--status", "expired", "-o", "plain"];
    let output = run_against(&server, &args).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "2");
}

#[tokio::test]
async fn test_members_get_by_phone() {
    let server = backend().await;
    let output = run_against(&server, &["members", "get", "99003"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("Name:      Arjun"), "{text}");
    assert!(text.contains("Quarterly - 3 months"), "{text}");
    assert!(text.contains("16-Nov-2025"), "{text}");
}

#[tokio::test]
async fn test_missing_member_exits_not_found() {
    let server = backend().await;
    let output = run_against(&server, &["members", "get", "404"]).await;
    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
}

#[tokio::test]
async fn test_renew_defaults_to_plan_length() {
    let server = backend().await;
    Mock::given(method("PUT"))
        .and(path("/api/members/1/renew"))
        .and(body_json(json!({"planId": 2, "newEndDate": "2026-02-12"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["members", "renew", "1"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("until 2026-02-12"));
}

#[tokio::test]
async fn test_renew_before_current_end_is_refused() {
    let server = backend().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_against(&server, &["members", "renew", "4", "--end", "2025-12-01"]).await;
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("cannot be before current end date"));
}

#[tokio::test]
async fn test_delete_needs_confirmation_when_not_interactive() {
    let server = backend().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_against(&server, &["members", "delete", "1"]).await;
    assert_eq!(output.status.code(), Some(2), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("--yes"));
}

#[tokio::test]
async fn test_delete_with_yes() {
    let server = backend().await;
    Mock::given(method("DELETE"))
        .and(path("/api/members/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["members", "delete", "1", "--yes"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
}

#[tokio::test]
async fn test_export_to_stdout() {
    let server = backend().await;
    let args = ["members", "export", "--file", "-", "--search", "meera"];
    let output = run_against(&server, &args).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Name,Phone,Email,PlanId,StartDate,EndDate\n\
         \"Meera\",\"99001\",\"\",\"2\",\"2025-08-12\",\"2025-11-12\"\n"
    );
}

#[tokio::test]
async fn test_expired_session_exits_with_auth_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let output = run_against(&server, &["members", "list"]).await;
    assert_eq!(output.status.code(), Some(3), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("gymdesk login"));
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_expired_session_drops_saved_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("authorization", "Bearer stale-token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let config_file = home.path().join("gymdesk").join("config.toml");
    std::fs::create_dir_all(config_file.parent().unwrap()).unwrap();
    std::fs::write(
        &config_file,
        format!(
            "default_profile = \"front-desk-expired\"\n\n\
             [profiles.front-desk-expired]\n\
             server = \"{}/api\"\n\
             token = \"stale-token\"\n",
            server.uri()
        ),
    )
    .unwrap();

    let mut cmd = gymdesk_cmd();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .args(["--as-of", "2025-11-10", "members", "list"]);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();
    assert_eq!(output.status.code(), Some(3), "{}", combined_output(&output));

    let saved = std::fs::read_to_string(&config_file).unwrap();
    assert!(saved.contains("[profiles.front-desk-expired]"), "{saved}");
    assert!(!saved.contains("stale-token"), "token survived the 401:\n{saved}");
}
