//! End-to-end tests for the `lodge` binary

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn lodge(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lodge").unwrap();
    cmd.env("LODGEBOOK_DATA_DIR", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn import(dir: &TempDir, file: &str) {
    lodge(dir)
        .args(["import", "preview"])
        .arg(fixture(file))
        .assert()
        .success();
    lodge(dir).args(["import", "confirm"]).assert().success();
}

#[test]
fn test_init_creates_config() {
    let dir = TempDir::new().unwrap();

    lodge(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created default configuration"));
    assert!(dir.path().join("config.json").exists());

    lodge(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Existing configuration kept"));
}

#[test]
fn test_preview_then_confirm() {
    let dir = TempDir::new().unwrap();

    lodge(&dir)
        .args(["import", "preview"])
        .arg(fixture("guests.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Rows: 4   New: 3   Returning guests: 0   Skipped: 1",
        ));

    // nothing is saved until confirm
    lodge(&dir)
        .args(["booking", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No bookings found."));

    lodge(&dir)
        .args(["import", "confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Imported 3 booking(s) from 4 row(s): 3 new, 0 returning, 1 skipped.",
        ));

    lodge(&dir)
        .args(["booking", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Anna Smit"))
        .stdout(predicate::str::contains("3 booking(s)"));
}

#[test]
fn test_second_preview_blocked_until_cancel() {
    let dir = TempDir::new().unwrap();

    lodge(&dir)
        .args(["import", "preview"])
        .arg(fixture("guests.csv"))
        .assert()
        .success();
    lodge(&dir)
        .args(["import", "preview"])
        .arg(fixture("returning.csv"))
        .assert()
        .failure();

    lodge(&dir)
        .args(["import", "cancel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing was saved"));
    lodge(&dir)
        .args(["import", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No import is pending"));
}

#[test]
fn test_confirm_without_preview_fails() {
    let dir = TempDir::new().unwrap();

    lodge(&dir)
        .args(["import", "confirm"])
        .assert()
        .failure();
}

#[test]
fn test_returning_guest_is_recognised() {
    let dir = TempDir::new().unwrap();
    import(&dir, "guests.csv");

    lodge(&dir)
        .args(["import", "preview"])
        .arg(fixture("returning.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Returning guests: 1"))
        .stdout(predicate::str::contains("matches Anna Smit (same ID)"));

    lodge(&dir)
        .args(["import", "confirm", "--new-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 booking(s)"));

    lodge(&dir)
        .args(["booking", "history", "AB123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Anna Smit"));
}

#[test]
fn test_reports_and_export() {
    let dir = TempDir::new().unwrap();
    import(&dir, "guests.csv");

    lodge(&dir)
        .args(["report", "dashboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bookings:          3"));

    lodge(&dir)
        .args(["report", "monthly", "--year", "2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jan"))
        .stdout(predicate::str::contains("Feb"));

    lodge(&dir)
        .args(["export", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"schema_version\""));

    let out = dir.path().join("bookings.csv");
    lodge(&dir)
        .args(["export", "bookings", "--output"])
        .arg(&out)
        .assert()
        .success();
    let csv = std::fs::read_to_string(&out).unwrap();
    assert!(csv.contains("Jan de Wit"));
}

#[test]
fn test_check_in_and_audit() {
    let dir = TempDir::new().unwrap();

    lodge(&dir)
        .args(["booking", "check-in", "Thandi Nkosi", "--country", "RSA"])
        .args(["--arrival", "2025-06-01", "--departure", "2025-06-03"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("indemnity"));

    lodge(&dir)
        .args(["booking", "check-in", "Thandi Nkosi", "--country", "RSA"])
        .args(["--arrival", "2025-06-01", "--departure", "2025-06-03"])
        .arg("--accept-indemnity")
        .assert()
        .success()
        .stdout(predicate::str::contains("Checked in Thandi Nkosi for 2 night(s)"));

    lodge(&dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE"));
}
