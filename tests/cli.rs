use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn studybuddy(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("studybuddy").unwrap();
    cmd.env("STUDYBUDDY_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_config_path_uses_home_override() {
    let home = TempDir::new().unwrap();

    studybuddy(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"))
        .stdout(predicate::str::contains(home.path().to_string_lossy().as_ref()));
}

#[test]
fn test_config_init_then_refuse_overwrite() {
    let home = TempDir::new().unwrap();

    studybuddy(&home).args(["config", "init"]).assert().success();
    assert!(home.path().join("config.yaml").exists());

    studybuddy(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    studybuddy(&home)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_config_show_json() {
    let home = TempDir::new().unwrap();

    studybuddy(&home)
        .args(["--output", "json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"focus_minutes\": 25"));
}

#[test]
fn test_invalid_config_file_is_reported() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("config.yaml"), "focus: [not, a, map]").unwrap();

    studybuddy(&home)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_history_empty() {
    let home = TempDir::new().unwrap();

    studybuddy(&home)
        .args(["focus", "history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No focus intervals recorded"));
    assert!(home.path().join("studybuddy.db").exists());
}

#[test]
fn test_today_json_empty() {
    let home = TempDir::new().unwrap();

    studybuddy(&home)
        .args(["focus", "today", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 0"));
}

#[test]
fn test_report_json() {
    let home = TempDir::new().unwrap();

    studybuddy(&home)
        .args(["--output", "json", "focus", "report", "month"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"completed_intervals\": 0"))
        .stdout(predicate::str::contains("\"streak_days\": 0"));
}

#[test]
fn test_report_unknown_period_fails() {
    let home = TempDir::new().unwrap();

    studybuddy(&home)
        .args(["focus", "report", "fortnight"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fortnight"));
}

#[test]
fn test_clear_requires_force() {
    let home = TempDir::new().unwrap();

    studybuddy(&home)
        .args(["focus", "clear"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    studybuddy(&home)
        .args(["focus", "clear", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 intervals"));
}

#[test]
fn test_delete_missing_interval() {
    let home = TempDir::new().unwrap();

    studybuddy(&home)
        .args(["focus", "delete", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_run_rejects_bad_duration_before_opening_screen() {
    let home = TempDir::new().unwrap();

    studybuddy(&home)
        .args(["focus", "run", "--focus", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid focus duration"));
}

#[test]
fn test_run_rejects_oversized_duration() {
    let home = TempDir::new().unwrap();

    studybuddy(&home)
        .args(["focus", "run", "--focus", "9223372036854775807"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid focus duration"));

    studybuddy(&home)
        .args(["focus", "run", "--short", "99999999999999999h"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid short break duration"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();

    studybuddy(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("studybuddy"));
}
