#![forbid(unsafe_code)]
mod common;

use assert_cmd::Command;
use common::*;
use permanence::{JsonSessionStore, SessionStore};
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

fn cli(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("permanence-cli").unwrap();
    cmd.current_dir(dir.path())
        .env("PERMANENCE_API_URL", "http://127.0.0.1:9")
        .env("PERMANENCE_SESSION", dir.path().join("session.json"))
        .env_remove("PERMANENCE_ZONE_STYLE");
    cmd
}

fn logged_in(dir: &TempDir) {
    JsonSessionStore::open(dir.path().join("session.json"))
        .save(&session_for("u1", "Kevin Selassie"))
        .unwrap();
}

#[test]
fn zones_lists_catalog_with_abbreviations() {
    let dir = tempdir().unwrap();
    cli(&dir)
        .arg("zones")
        .assert()
        .success()
        .stdout(predicate::str::contains("NW Le"))
        .stdout(predicate::str::contains("North-East Schaarbeek Noord"));
}

#[test]
fn whoami_requires_login() {
    let dir = tempdir().unwrap();
    cli(&dir)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}

#[test]
fn whoami_shows_session_user() {
    let dir = tempdir().unwrap();
    logged_in(&dir);
    cli(&dir)
        .args(["whoami", "--log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kevin Selassie (u1)"))
        .stdout(predicate::str::contains("[NW Le]"));
}

#[test]
fn request_without_dates_is_rejected_locally() {
    let dir = tempdir().unwrap();
    logged_in(&dir);
    cli(&dir)
        .arg("request")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Please select at least one date."));
}

#[test]
fn logout_removes_session() {
    let dir = tempdir().unwrap();
    logged_in(&dir);
    cli(&dir).arg("logout").assert().success();
    assert!(!dir.path().join("session.json").exists());
}

#[test]
fn register_rejects_unknown_zone() {
    let dir = tempdir().unwrap();
    cli(&dir)
        .args([
            "register",
            "--name",
            "Kevin Selassie",
            "--email",
            "kevin@example.com",
            "--password",
            "secret",
            "--zone",
            "Atlantis",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown zone"));
}

#[test]
fn login_validates_email_before_calling_api() {
    let dir = tempdir().unwrap();
    cli(&dir)
        .args(["login", "--email", "not-an-email", "--password", "x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Email is invalid"));
}

#[test]
fn rejected_token_clears_session() {
    let server = httpmock::MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::GET)
            .path_matches(r"^/api/auth/user/zone/")
            .header("authorization", "Bearer tok");
        then.status(401).body("jwt expired");
    });

    let dir = tempdir().unwrap();
    logged_in(&dir);
    cli(&dir)
        .env("PERMANENCE_API_URL", server.base_url())
        .arg("calendar")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Session expired, please log in again."));

    mock.assert();
    assert!(!dir.path().join("session.json").exists());
}
