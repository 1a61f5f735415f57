//! Bundle encryption pipeline.
//!
//! Replaces the contents of a platform `www/` folder with an encrypted zip of
//! those contents, optionally split into numbered chunks.
//!
//! # Process
//!
//! 1. Zip the folder into a sibling staging directory
//! 2. Encrypt the zip with the job's [`CipherProfile`]
//! 3. Delete the unencrypted zip
//! 4. Optionally split the encrypted zip into chunks and delete it
//! 5. Commit: move the original assets into a sibling backup directory,
//!    move the staged output into the folder, then delete backup and staging
//!
//! Steps 1-4 never touch the `www/` folder, so a failure there leaves the
//! original assets in place. Every step of the commit is a rename; if one
//! fails the error names the backup directory holding the original assets.
//!
//! # Module Organization
//!
//! - [`archive`] - Deterministic zip creation and extraction
//! - [`cipher`] - Cipher profiles and streaming encryption
//! - [`chunk`] - Chunk splitting and reassembly

pub mod archive;
pub mod chunk;
pub mod cipher;

pub use cipher::{CipherProfile, decrypt_file, encrypt_file};

use crate::bundler::{
    error::{Context, Error, ErrorExt, Result},
    settings::{ENCRYPTED_BUNDLE_NAME, EncryptionSettings, UNENCRYPTED_BUNDLE_NAME},
    utils::fs as fs_utils,
};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One run of the encryption pipeline over a single `www/` folder.
#[derive(Clone, Debug)]
pub struct EncryptionJob {
    /// Folder whose contents are replaced by the encrypted bundle.
    pub source_folder: PathBuf,
    /// Sibling directory where the bundle is built.
    pub staging_dir: PathBuf,
    /// Sibling directory receiving the original assets during commit.
    pub backup_dir: PathBuf,
    /// Staged zip before encryption.
    pub unencrypted_archive_path: PathBuf,
    /// Staged encrypted zip.
    pub encrypted_archive_path: PathBuf,
    /// Cipher used for the bundle.
    pub profile: CipherProfile,
    /// Whether the encrypted zip is split into chunks.
    pub split_enabled: bool,
    /// Maximum chunk size in bytes.
    pub chunk_size_bytes: u64,
}

impl EncryptionJob {
    /// Plans a job for `www_folder`.
    ///
    /// When `settings` carries no explicit profile it is inferred with
    /// [`CipherProfile::detect`].
    pub fn new(www_folder: &Path, settings: &EncryptionSettings) -> Result<Self> {
        let source_folder = www_folder
            .absolutize()
            .fs_context("resolving folder path", www_folder)?
            .into_owned();
        let parent = source_folder
            .parent()
            .with_context(|| format!("{} has no parent folder", source_folder.display()))?;
        let name = source_folder
            .file_name()
            .with_context(|| format!("{} has no folder name", source_folder.display()))?
            .to_string_lossy()
            .into_owned();

        let run_id = Uuid::new_v4();
        let staging_dir = parent.join(format!(".{name}.staging-{run_id}"));
        let backup_dir = parent.join(format!(".{name}.backup-{run_id}"));

        let profile = match settings.profile() {
            Some(profile) => profile,
            None => CipherProfile::detect(&source_folder)?,
        };

        Ok(Self {
            unencrypted_archive_path: staging_dir.join(UNENCRYPTED_BUNDLE_NAME),
            encrypted_archive_path: staging_dir.join(ENCRYPTED_BUNDLE_NAME),
            source_folder,
            staging_dir,
            backup_dir,
            profile,
            split_enabled: settings.split_file(),
            chunk_size_bytes: settings.chunk_size_bytes(),
        })
    }

    /// Runs the job and returns the paths of the files left in the folder.
    pub async fn run(&self) -> Result<Vec<PathBuf>> {
        log::debug!(
            "Encrypting web resources in {} (profile {}, split {}, chunk size {} bytes)",
            self.source_folder.display(),
            self.profile,
            self.split_enabled,
            self.chunk_size_bytes
        );

        let metadata = tokio::fs::metadata(&self.source_folder)
            .await
            .fs_context("reading folder", &self.source_folder)?;
        if !metadata.is_dir() {
            crate::bail!("{} is not a directory", self.source_folder.display());
        }

        let staged = match self.stage().await {
            Ok(staged) => staged,
            Err(e) => {
                if let Err(cleanup) = fs_utils::remove_dir_all(&self.staging_dir).await {
                    log::warn!("{cleanup}");
                }
                return Err(e);
            }
        };

        let outputs = self.commit(&staged).await.map_err(|e| Error::CommitFailed {
            target: self.source_folder.clone(),
            backup: self.backup_dir.clone(),
            error: Box::new(e),
        })?;

        for leftover in [&self.backup_dir, &self.staging_dir] {
            if let Err(e) = fs_utils::remove_dir_all(leftover).await {
                log::warn!("Failed to clean up {}: {e}", leftover.display());
            }
        }

        log::info!(
            "Encrypted {} into {} file(s)",
            self.source_folder.display(),
            outputs.len()
        );
        Ok(outputs)
    }

    /// Builds the final output inside the staging directory.
    async fn stage(&self) -> Result<Vec<PathBuf>> {
        fs_utils::create_dir_all(&self.staging_dir, true).await?;

        archive::zip_folder_contents(&self.source_folder, &self.unencrypted_archive_path)
            .await
            .context("zip file creation failure")?;
        log::debug!("Successful zip file creation {UNENCRYPTED_BUNDLE_NAME}");

        encrypt_file(
            self.profile,
            &self.unencrypted_archive_path,
            &self.encrypted_archive_path,
        )
        .await
        .context("zip file encryption failure")?;
        log::debug!("Successfully encrypted the zip file {ENCRYPTED_BUNDLE_NAME}");

        tokio::fs::remove_file(&self.unencrypted_archive_path)
            .await
            .fs_context("removing unencrypted bundle", &self.unencrypted_archive_path)?;

        if !self.split_enabled {
            return Ok(vec![self.encrypted_archive_path.clone()]);
        }

        let chunks =
            chunk::split_file_into_chunks(&self.encrypted_archive_path, self.chunk_size_bytes)
                .await
                .context("splitting encrypted bundle")?;
        tokio::fs::remove_file(&self.encrypted_archive_path)
            .await
            .fs_context("removing unsplit bundle", &self.encrypted_archive_path)?;
        Ok(chunks)
    }

    /// Swaps the staged files in place of the folder's contents.
    async fn commit(&self, staged: &[PathBuf]) -> Result<Vec<PathBuf>> {
        log::debug!(
            "Moving original assets of {} to {}",
            self.source_folder.display(),
            self.backup_dir.display()
        );
        fs_utils::move_dir_contents(&self.source_folder, &self.backup_dir).await?;

        let mut outputs = Vec::with_capacity(staged.len());
        for file in staged {
            let name = file
                .file_name()
                .with_context(|| format!("staged path {} has no file name", file.display()))?;
            let target = self.source_folder.join(name);
            fs_utils::move_path(file, &target).await?;
            outputs.push(target);
        }
        Ok(outputs)
    }
}

/// Encrypts the contents of `www_folder` in place.
///
/// Returns the paths of the encrypted bundle or its chunks inside the folder.
///
/// # Examples
///
/// ```no_run
/// use hybrid_asset_bundler::bundler::{encrypt_bundle, EncryptionSettings, CipherProfile};
///
/// # async fn example() -> hybrid_asset_bundler::bundler::Result<()> {
/// let settings = EncryptionSettings::builder()
///     .profile(CipherProfile::Aes256Cbc)
///     .split_file(true)
///     .build()?;
/// let www = std::path::Path::new("platforms/android/app/src/main/assets/www");
/// for chunk in encrypt_bundle(www, &settings).await? {
///     println!("{}", chunk.display());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn encrypt_bundle(www_folder: &Path, settings: &EncryptionSettings) -> Result<Vec<PathBuf>> {
    EncryptionJob::new(www_folder, settings)?.run().await
}
