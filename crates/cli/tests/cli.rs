//! Binary-level tests for `fitting-room`.
//!
//! Every test runs in a fresh temporary project directory; none of them
//! needs a live generation backend.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const UNREACHABLE_API: &str = "http://127.0.0.1:9";

fn fitting_room(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fitting-room").unwrap();
    cmd.arg("--dir")
        .arg(dir.path())
        .env_remove("FITTING_ROOM_API_URL")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn project_with_config(config_toml: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let fr_dir = dir.path().join(".fitting-room");
    fs::create_dir_all(&fr_dir).unwrap();
    fs::write(fr_dir.join("config.toml"), config_toml).unwrap();
    dir
}

#[test]
fn test_help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    fitting_room(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("poll"))
        .stdout(predicate::str::contains("catalog"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_init_writes_structure_and_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();

    fitting_room(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"))
        .stdout(predicate::str::contains("catalog/female.yaml"));
    assert!(dir.path().join(".fitting-room/catalog/male.yaml").exists());

    fitting_room(&dir)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    fitting_room(&dir)
        .args(["init", "--force", "--minimal"])
        .assert()
        .success();
}

#[test]
fn test_catalog_falls_back_to_builtin_entries() {
    let dir = tempfile::tempdir().unwrap();
    fitting_room(&dir)
        .args(["catalog", "--gender", "female"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Formal Dress (full outfit)"))
        .stdout(predicate::str::contains("Urban Cafe"))
        .stdout(predicate::str::contains("Blue T-Shirt").not());
}

#[test]
fn test_catalog_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = fitting_room(&dir)
        .args(["catalog", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["genders"].as_array().unwrap().len(), 2);
    assert_eq!(value["backgrounds"].as_array().unwrap().len(), 4);
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = project_with_config("[generation]\nvideo_model = \"sora\"\n");
    fitting_room(&dir)
        .arg("catalog")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown video model 'sora'"));
}

#[test]
fn test_generate_requires_readable_photo() {
    let dir = tempfile::tempdir().unwrap();
    fitting_room(&dir)
        .args([
            "generate",
            "--photo",
            "missing.jpg",
            "--top",
            "Blue T-Shirt",
            "--bottom",
            "Black Jeans",
            "--background",
            "Studio",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load photo"));
}

#[test]
fn test_generate_rejects_unknown_garment_before_submitting() {
    let dir = tempfile::tempdir().unwrap();
    let photo = dir.path().join("me.jpg");
    fs::write(&photo, [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();

    fitting_room(&dir)
        .args(["generate", "--gender", "male", "--photo"])
        .arg(&photo)
        .args([
            "--top",
            "Formal Dress",
            "--bottom",
            "Black Jeans",
            "--background",
            "Studio",
            "--api-url",
            UNREACHABLE_API,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Formal Dress"));
}

#[test]
fn test_generate_fails_when_backend_is_unreachable() {
    let dir = tempfile::tempdir().unwrap();
    let photo = dir.path().join("me.png");
    fs::write(&photo, [0x89, b'P', b'N', b'G']).unwrap();

    fitting_room(&dir)
        .args(["generate", "--gender", "female", "--photo"])
        .arg(&photo)
        .args([
            "--top",
            "Pink Blouse",
            "--bottom",
            "Black Skirt",
            "--background",
            "Gym",
            "--api-url",
            UNREACHABLE_API,
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("→ LOADING"))
        .stdout(predicate::str::contains("Generation failed:"))
        .stdout(predicate::str::contains("→ SELECT"));
}

#[test]
fn test_poll_times_out_against_unreachable_backend() {
    let dir = project_with_config("[polling]\ninterval_ms = 10\nmax_attempts = 3\n");
    fitting_room(&dir)
        .args(["poll", "job-123", "--stage", "video", "--api-url", UNREACHABLE_API])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Generation timeout"))
        .stderr(predicate::str::contains("after 3 attempts"));
}
