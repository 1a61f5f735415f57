//! Exit codes and side effects of the two command line tools.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

// Negative exit codes are truncated to a byte on unix.
#[cfg(unix)]
const GENERIC_FAILURE: i32 = 255;
#[cfg(unix)]
const MISSING_CHECKSUM_FOLDER: i32 = 254;
#[cfg(not(unix))]
const GENERIC_FAILURE: i32 = -1;
#[cfg(not(unix))]
const MISSING_CHECKSUM_FOLDER: i32 = -2;

fn prepare_platform(app: &Path, www: &str, with_worklight: bool) {
    let www = app.join(www);
    std::fs::create_dir_all(www.join("js")).unwrap();
    std::fs::write(www.join("index.html"), b"<html></html>\n").unwrap();
    std::fs::write(www.join("js/app.js"), b"var a = 1;\n").unwrap();
    if with_worklight {
        std::fs::create_dir_all(www.join("plugins/cordova-plugin-mfp/worklight")).unwrap();
    }
}

fn checksum_cmd() -> Command {
    Command::cargo_bin("asset-checksum").unwrap()
}

fn encrypt_cmd() -> Command {
    Command::cargo_bin("asset-encrypt").unwrap()
}

#[test]
fn checksum_writes_script_for_each_platform() {
    let app = tempfile::tempdir().unwrap();
    prepare_platform(app.path(), "platforms/android/app/src/main/assets/www", true);
    prepare_platform(app.path(), "platforms/ios/www", true);

    checksum_cmd()
        .args(["--path"])
        .arg(app.path())
        .args(["--platforms", "android, ios"])
        .assert()
        .success();

    for www in ["platforms/android/app/src/main/assets/www", "platforms/ios/www"] {
        let script = app
            .path()
            .join(www)
            .join("plugins/cordova-plugin-mfp/worklight/checksum.js");
        let contents = std::fs::read_to_string(script).unwrap();
        assert!(contents.starts_with("var WL_CHECKSUM = {\"checksum\":"));
        assert!(app.path().join(www).join("filelist").is_file());
    }
}

#[test]
fn checksum_without_platforms_succeeds() {
    let app = tempfile::tempdir().unwrap();

    checksum_cmd().arg("-p").arg(app.path()).assert().success();
}

#[test]
fn checksum_missing_app_path_is_generic_failure() {
    let app = tempfile::tempdir().unwrap();

    checksum_cmd()
        .arg("--path")
        .arg(app.path().join("missing"))
        .args(["--platforms", "ios"])
        .assert()
        .code(GENERIC_FAILURE);
}

#[test]
fn checksum_unknown_platform_is_generic_failure() {
    let app = tempfile::tempdir().unwrap();
    prepare_platform(app.path(), "platforms/ios/www", true);

    checksum_cmd()
        .arg("--path")
        .arg(app.path())
        .args(["--platforms", "blackberry"])
        .assert()
        .code(GENERIC_FAILURE)
        .stderr(predicate::str::contains("Non existent platform 'blackberry'"));
}

#[test]
fn checksum_missing_worklight_folder_is_distinct() {
    let app = tempfile::tempdir().unwrap();
    prepare_platform(app.path(), "platforms/windows/www", false);

    checksum_cmd()
        .arg("--path")
        .arg(app.path())
        .args(["--platforms", "windows"])
        .assert()
        .code(MISSING_CHECKSUM_FOLDER);
}

#[test]
fn checksum_stops_at_first_failing_platform() {
    let app = tempfile::tempdir().unwrap();
    prepare_platform(app.path(), "platforms/ios/www", true);

    checksum_cmd()
        .arg("--path")
        .arg(app.path())
        .args(["--platforms", "android,ios"])
        .assert()
        .code(GENERIC_FAILURE);

    assert!(
        !app.path()
            .join("platforms/ios/www/plugins/cordova-plugin-mfp/worklight/checksum.js")
            .exists()
    );
}

#[test]
fn encrypt_replaces_folder_contents() {
    let app = tempfile::tempdir().unwrap();
    prepare_platform(app.path(), "platforms/ios/www", false);
    let www = app.path().join("platforms/ios/www");

    encrypt_cmd()
        .arg("--path")
        .arg(&www)
        .args(["--chunk", "--size", "768"])
        .assert()
        .success();

    let names: Vec<_> = std::fs::read_dir(&www)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["resources.zip.001"]);
}

#[test]
fn encrypt_missing_path_exits_with_one() {
    let app = tempfile::tempdir().unwrap();

    encrypt_cmd()
        .arg("--path")
        .arg(app.path().join("www"))
        .assert()
        .code(1);
}

#[test]
fn encrypt_rejects_zero_chunk_size() {
    let app = tempfile::tempdir().unwrap();
    prepare_platform(app.path(), "www", false);

    encrypt_cmd()
        .arg("--path")
        .arg(app.path().join("www"))
        .args(["--chunk", "--size", "0"])
        .assert()
        .code(1);

    assert!(app.path().join("www/index.html").is_file());
}

#[test]
fn encrypt_rejects_unknown_profile() {
    let app = tempfile::tempdir().unwrap();
    prepare_platform(app.path(), "www", false);

    encrypt_cmd()
        .arg("--path")
        .arg(app.path().join("www"))
        .args(["--profile", "rot13"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid cipher profile"));
}

fn script_checksum(script: &Path) -> u64 {
    let contents = std::fs::read_to_string(script).unwrap();
    let literal = contents
        .lines()
        .next()
        .unwrap()
        .strip_prefix("var WL_CHECKSUM = ")
        .unwrap();
    let record: serde_json::Value = serde_json::from_str(literal).unwrap();
    record["checksum"].as_u64().unwrap()
}

#[test]
fn checksum_rerun_reports_the_same_value() {
    let app = tempfile::tempdir().unwrap();
    prepare_platform(app.path(), "platforms/ios/www", true);
    let script = app
        .path()
        .join("platforms/ios/www/plugins/cordova-plugin-mfp/worklight/checksum.js");

    let mut values = Vec::new();
    for _ in 0..2 {
        checksum_cmd()
            .arg("--path")
            .arg(app.path())
            .args(["--platforms", "ios"])
            .assert()
            .success();
        values.push(script_checksum(&script));
    }

    assert_eq!(values[0], values[1]);
}

#[test]
fn encrypt_rejects_oversized_chunk_size() {
    let app = tempfile::tempdir().unwrap();
    prepare_platform(app.path(), "www", false);

    encrypt_cmd()
        .arg("--path")
        .arg(app.path().join("www"))
        .args(["--chunk", "--size", "36028797018963968"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("too large"));

    assert!(app.path().join("www/index.html").is_file());
}
