//! End-to-end CLI tests for threema2html.
//!
//! These tests run the actual binary against unpacked-archive folders on
//! disk and check both the console behavior and the written HTML file.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};

fn bin() -> Command {
    Command::cargo_bin("threema2html").expect("binary builds")
}

/// Creates an unpacked archive folder with a messages file and media.
fn archive_with(messages: &str, media: &[&str]) -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("messages.txt"), messages).unwrap();
    for name in media {
        fs::write(dir.path().join(name), "binary").unwrap();
    }
    dir
}

fn html_files(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "html"))
        .collect()
}

#[test]
fn test_successful_conversion_writes_timestamped_file() {
    let dir = archive_with(
        "[2024-01-01, 10:00] Alice: Hello\n[2024-01-01, 10:01] Me: Hi\n",
        &[],
    );

    bin()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Done!"));

    let outputs = html_files(dir.path());
    assert_eq!(outputs.len(), 1);
    let name = outputs[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("threema-"));

    let html = fs::read_to_string(&outputs[0]).unwrap();
    assert!(html.contains("<div class=\"Alice\">"));
    assert!(html.contains("<div class=\"Me\">"));
}

#[test]
fn test_output_flag_overrides_generated_name() {
    let dir = archive_with("[2024-01-01, 10:00] Alice: Hello\n", &[]);
    let out = dir.path().join("chat.html");

    bin()
        .arg(dir.path())
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    assert!(out.is_file());
}

#[test]
fn test_media_rendered_in_output() {
    let dir = archive_with(
        "[2024-01-01, 10:00] Alice: look <photo.jpg>\n",
        &["photo.jpg"],
    );
    let out = dir.path().join("chat.html");

    bin().arg(dir.path()).arg("-o").arg(&out).assert().success();

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("<br><img src=\"photo.jpg\" alt=\"photo.jpg\">"));
}

#[test]
fn test_missing_directory_fails() {
    bin()
        .arg("/definitely/not/a/real/path")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_missing_messages_file_fails_with_guidance() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("other.txt"), "x").unwrap();

    bin()
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("messages.txt"))
        .stderr(predicate::str::contains("--help"));
}

#[test]
fn test_invalid_archive_fails_and_writes_nothing() {
    let dir = archive_with("plain text, no timestamp header\n", &[]);

    bin()
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Threema timestamp"));

    assert!(html_files(dir.path()).is_empty());
}

#[test]
fn test_custom_messages_filename_positional() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("export.txt"),
        "[2024-01-01, 10:00] Alice: Hello\n",
    )
    .unwrap();
    let out = dir.path().join("chat.html");

    bin()
        .arg(dir.path())
        .arg("export.txt")
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    assert!(fs::read_to_string(&out).unwrap().contains("Hello"));
}

#[test]
fn test_help_shows_archive_recipe() {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive chat"))
        .stdout(predicate::str::contains("EXAMPLES"));
}

#[test]
fn test_malformed_config_warns_but_succeeds() {
    let dir = archive_with("[2024-01-01, 10:00] Alice: Hello\n", &[]);
    fs::write(dir.path().join("threema2html.config"), "{ not json").unwrap();
    let out = dir.path().join("chat.html");

    bin()
        .arg(dir.path())
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("default configuration values"));

    // defaults applied
    assert!(fs::read_to_string(&out).unwrap().contains("<title>Threema</title>"));
}

#[test]
fn test_config_overlay_applied_from_target_dir() {
    let dir = archive_with("[2024-01-01, 10:00] Alice: Hello\n", &[]);
    fs::write(
        dir.path().join("threema2html.config"),
        r#"{"htmlTitle": "Holidays"}"#,
    )
    .unwrap();
    let out = dir.path().join("chat.html");

    bin().arg(dir.path()).arg("-o").arg(&out).assert().success();

    assert!(fs::read_to_string(&out).unwrap().contains("<title>Holidays</title>"));
}
