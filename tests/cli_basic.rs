//! Integration tests for basic CLI behavior.
//!
//! Tests that the binary exists, accepts standard flags, and the offline
//! subcommands (`services`, `classify`) answer without network access.

#![allow(deprecated)] // cargo_bin deprecation, replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: get a Command for the `pipex` binary.
fn pipex() -> Command {
    let mut cmd = Command::cargo_bin("pipex").expect("binary 'pipex' should be built");
    // Keep a developer's settings file out of the picture.
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir().join("pipex-cli-tests"));
    cmd
}

// ─── Top-level flags ─────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    pipex()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: pipex"))
        .stdout(predicate::str::contains("services"))
        .stdout(predicate::str::contains("classify"))
        .stdout(predicate::str::contains("playlist"))
        .stdout(predicate::str::contains("stream"));
}

#[test]
fn version_flag_shows_semver() {
    pipex()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^pipex \d+\.\d+\.\d+\n$").unwrap());
}

#[test]
fn no_args_shows_error_and_usage() {
    pipex()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: pipex"));
}

#[test]
fn invalid_subcommand_fails() {
    pipex()
        .arg("this-is-not-a-real-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// ─── Subcommand help ─────────────────────────────────────────────────────────

#[test]
fn playlist_help() {
    pipex()
        .args(["playlist", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("--all-pages"));
}

#[test]
fn playlist_requires_url() {
    pipex()
        .arg("playlist")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<URL>"));
}

// ─── Offline subcommands ─────────────────────────────────────────────────────

#[test]
fn services_lists_bandcamp() {
    pipex()
        .arg("services")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bandcamp"))
        .stdout(predicate::str::contains("audio"));
}

#[test]
fn classify_album_url() {
    pipex()
        .args(["classify", "https://macbenson.bandcamp.com/album/coming-of-age"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bandcamp"))
        .stdout(predicate::str::contains("playlist"))
        .stdout(predicate::str::contains("macbenson/coming-of-age"));
}

#[test]
fn classify_track_url() {
    pipex()
        .args(["classify", "https://macbenson.bandcamp.com/track/thunder?from=embed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stream"))
        .stdout(predicate::str::contains(
            "https://macbenson.bandcamp.com/track/thunder",
        ));
}

#[test]
fn classify_unknown_url_fails() {
    pipex()
        .args(["classify", "https://example.com/page"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("https://example.com/page"));
}
