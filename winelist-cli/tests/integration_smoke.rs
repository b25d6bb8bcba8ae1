//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn winelist() -> Command {
    let mut cmd = Command::cargo_bin("winelist").unwrap();
    // Keep the developer's environment out of argument parsing
    cmd.env_remove("DATABASE_URL")
        .env_remove("PORT")
        .env_remove("HOST")
        .current_dir(std::env::temp_dir());
    cmd
}

#[test]
fn test_help_lists_commands() {
    winelist()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"));
}

#[test]
fn test_serve_help() {
    winelist()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Database URL"))
        .stdout(predicate::str::contains("--port"));
}

#[test]
fn test_migrate_help() {
    winelist()
        .arg("migrate")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--database-url"));
}

#[test]
fn test_serve_requires_database_url() {
    winelist()
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--database-url"));
}

#[test]
fn test_serve_rejects_bad_port() {
    winelist()
        .args(["serve", "--database-url", "postgres://localhost/x", "--port", "99999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--port"));
}
