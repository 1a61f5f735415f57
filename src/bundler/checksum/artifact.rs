//! Generated checksum script.
//!
//! The mobile runtime loads `checksum.js` at boot and reads the folder
//! fingerprint from a single global:
//!
//! ```text
//! var WL_CHECKSUM = {"checksum":3555316750,"date":1430744771075,"machine":"build-host"}
//! /* Date: Mon, 4 May 2015 09:06:11 -0400 */
//! ```

use crate::bundler::{
    error::{ErrorExt, Result},
    settings::{CHECKSUM_ARTIFACT_NAME, CHECKSUM_GLOBAL},
    utils::fs::ensure_writable,
};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct ChecksumRecord<'a> {
    checksum: u32,
    date: i64,
    machine: &'a str,
}

/// Renders the script contents for `checksum` generated at `now` on `machine`.
pub fn render_checksum_artifact(
    checksum: u32,
    now: DateTime<Local>,
    machine: &str,
) -> Result<String> {
    let record = ChecksumRecord {
        checksum,
        date: now.timestamp_millis(),
        machine,
    };
    let json = serde_json::to_string(&record)?;
    Ok(format!(
        "var {CHECKSUM_GLOBAL} = {json}\n/* Date: {} */",
        now.to_rfc2822()
    ))
}

/// Writes `checksum.js` into `target_dir`, replacing any previous script.
///
/// A read-only script left by an earlier build is made writable first.
/// Failures are logged and reported as `false` so the caller decides whether
/// they are fatal.
pub async fn write_checksum_artifact(checksum: u32, target_dir: &Path) -> bool {
    match try_write_checksum_artifact(checksum, target_dir).await {
        Ok(path) => {
            log::debug!("Wrote checksum artifact {}", path.display());
            true
        }
        Err(e) => {
            log::debug!(
                "Exception occurred during file write of {}: {e}",
                CHECKSUM_ARTIFACT_NAME
            );
            false
        }
    }
}

async fn try_write_checksum_artifact(checksum: u32, target_dir: &Path) -> Result<PathBuf> {
    let path = target_dir.join(CHECKSUM_ARTIFACT_NAME);
    let contents = render_checksum_artifact(checksum, Local::now(), &host_name())?;
    log::trace!("Contents of {}: {contents}", path.display());

    // chmod failure is not fatal, the write below reports the real problem
    if let Err(e) = ensure_writable(&path).await {
        log::debug!("{e}");
    }

    tokio::fs::write(&path, contents)
        .await
        .fs_context("writing checksum artifact", &path)?;
    Ok(path)
}

fn host_name() -> String {
    sysinfo::System::host_name().unwrap_or_else(|| "localhost".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn renders_single_assignment_with_ordered_fields() {
        let now = Local.timestamp_millis_opt(1_430_744_771_075).unwrap();
        let script = render_checksum_artifact(3_555_316_750, now, "build-host").unwrap();

        let first_line = script.lines().next().unwrap();
        assert_eq!(
            first_line,
            r#"var WL_CHECKSUM = {"checksum":3555316750,"date":1430744771075,"machine":"build-host"}"#
        );
        assert!(script.lines().nth(1).unwrap().starts_with("/* Date: "));
    }

    #[test]
    fn machine_name_is_json_escaped() {
        let now = Local.timestamp_millis_opt(0).unwrap();
        let script = render_checksum_artifact(1, now, "odd\"host").unwrap();
        assert!(script.contains(r#""machine":"odd\"host""#));
    }

    #[tokio::test]
    async fn overwrites_read_only_script() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join(CHECKSUM_ARTIFACT_NAME);
        std::fs::write(&script, b"var WL_CHECKSUM = {}").unwrap();
        let mut perms = std::fs::metadata(&script).unwrap().permissions();
        perms.set_readonly(true);
        std::fs::set_permissions(&script, perms).unwrap();

        assert!(write_checksum_artifact(42, dir.path()).await);

        let contents = std::fs::read_to_string(&script).unwrap();
        assert!(contents.starts_with(r#"var WL_CHECKSUM = {"checksum":42,"date":"#));
        assert!(!std::fs::metadata(&script).unwrap().permissions().readonly());
    }

    #[tokio::test]
    async fn missing_folder_reports_false() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("plugins/cordova-plugin-mfp/worklight");

        assert!(!write_checksum_artifact(7, &missing).await);
        assert!(!missing.exists());
    }
}
