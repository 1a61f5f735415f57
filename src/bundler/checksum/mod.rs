//! Asset folder fingerprinting.
//!
//! This module computes the running CRC-32 fingerprint of a platform `www/`
//! folder and writes the artifacts the mobile runtime reads at boot.
//!
//! # Algorithm
//!
//! 1. Recursively collect all regular files (see [`walker`])
//! 2. Sort relative paths byte-wise for a deterministic order
//! 3. Drop files whose name is in [`CHECKSUM_EXCLUDES`]
//! 4. Write the `filelist` manifest at the top of the folder
//! 5. For each file: feed its content with `\r` removed, then its manifest path
//! 6. Sum the raw file sizes
//!
//! # Module Organization
//!
//! - [`accumulator`] - Running CRC-32 state and line ending normalization
//! - [`walker`] - Recursive file listing
//! - [`artifact`] - Generated `checksum.js` script

pub mod accumulator;
pub mod artifact;
pub mod walker;

pub use accumulator::{ChecksumMode, ChecksumState, strip_carriage_returns};
pub use artifact::{render_checksum_artifact, write_checksum_artifact};
pub use walker::{FileEntry, list_files};

use crate::bundler::{
    error::{ErrorExt, Result},
    settings::{CHECKSUM_EXCLUDES, FILELIST_NAME},
};
use path_absolutize::Absolutize;
use std::path::Path;

/// Fingerprint of one folder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FolderResult {
    /// Running CRC-32 over contents and paths.
    pub checksum: u32,
    /// Total size in bytes of the included files, before line ending normalization.
    pub size: u64,
}

/// Computes the fingerprint of `root` with the reference accumulation rule.
///
/// Writes the `filelist` manifest into `root` as a side effect.
///
/// # Examples
///
/// ```no_run
/// use hybrid_asset_bundler::bundler::compute_folder_checksum;
///
/// # async fn example() -> hybrid_asset_bundler::bundler::Result<()> {
/// let result = compute_folder_checksum("platforms/ios/www".as_ref()).await?;
/// println!("{} ({} bytes)", result.checksum, result.size);
/// # Ok(())
/// # }
/// ```
pub async fn compute_folder_checksum(root: &Path) -> Result<FolderResult> {
    compute_folder_checksum_with(root, ChecksumMode::Compatible).await
}

/// Computes the fingerprint of `root` using the given accumulation rule.
///
/// Relative roots are resolved against the current directory.
pub async fn compute_folder_checksum_with(root: &Path, mode: ChecksumMode) -> Result<FolderResult> {
    let root = root
        .absolutize()
        .fs_context("resolving folder path", root)?
        .into_owned();
    log::debug!("Calculating checksum of {}", root.display());

    let files = checksummed_files(&root).await?;
    write_filelist(&root, &files).await?;

    let mut state = ChecksumState::NotStarted;
    let mut size = 0u64;
    for file in &files {
        let raw = file.read().await?;
        let file_size = raw.len() as u64;
        let content = strip_carriage_returns(raw);

        state = state.feed(mode, &content);
        state = state.feed(mode, file.relative_path.as_bytes());
        size += file_size;

        log::trace!(
            "File: {}  size = {}  running cksum = {}",
            file.relative_path,
            file_size,
            state.value()
        );
    }

    let result = FolderResult {
        checksum: state.value(),
        size,
    };
    log::debug!(
        "Total checksum = {};  Total size = {}",
        result.checksum,
        result.size
    );
    Ok(result)
}

/// Sorted, filtered list of the files contributing to the fingerprint.
///
/// The manifest left at the top of the folder by an earlier run is skipped.
pub async fn checksummed_files(root: &Path) -> Result<Vec<FileEntry>> {
    let manifest = format!("/{FILELIST_NAME}");

    let mut files = list_files(root).await?;
    files.retain(|f| f.relative_path != manifest);
    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    files.retain(|f| !CHECKSUM_EXCLUDES.contains(&f.file_name()));
    Ok(files)
}

async fn write_filelist(root: &Path, files: &[FileEntry]) -> Result<()> {
    let path = root.join(FILELIST_NAME);
    let contents = files
        .iter()
        .map(|f| f.relative_path.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    log::trace!("filelist input:\n{contents}");

    tokio::fs::write(&path, contents)
        .await
        .fs_context("writing filelist", &path)
}
