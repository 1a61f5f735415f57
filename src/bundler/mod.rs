//! Asset fingerprinting and bundle encryption pipelines.
//!
//! Two independent pipelines operate on a platform `www/` folder:
//!
//! - [`checksum`] walks the folder, writes the `filelist` manifest and computes
//!   the running CRC-32 fingerprint, then [`checksum::write_checksum_artifact`]
//!   persists it as the generated `checksum.js` script.
//! - [`encrypt`] zips the folder, encrypts the archive with a [`CipherProfile`],
//!   optionally splits it into numbered chunks and swaps the result in place of
//!   the original assets.
//!
//! # Example
//!
//! ```no_run
//! use hybrid_asset_bundler::bundler::{
//!     compute_folder_checksum, encrypt_bundle, CipherProfile, EncryptionSettings,
//! };
//!
//! # async fn example() -> hybrid_asset_bundler::bundler::Result<()> {
//! let www = std::path::Path::new("/work/app/platforms/ios/www");
//! let result = compute_folder_checksum(www).await?;
//! println!("checksum {} over {} bytes", result.checksum, result.size);
//!
//! let settings = EncryptionSettings::builder()
//!     .profile(CipherProfile::Aes128Ecb)
//!     .build()?;
//! encrypt_bundle(www, &settings).await?;
//! # Ok(())
//! # }
//! ```

pub mod checksum;
pub mod encrypt;
pub mod error;
pub mod settings;
pub(crate) mod utils;

pub use checksum::{
    ChecksumMode, ChecksumState, FolderResult, compute_folder_checksum,
    compute_folder_checksum_with, write_checksum_artifact,
};
pub use encrypt::{CipherProfile, EncryptionJob, encrypt_bundle};
pub use error::{Context, Error, ErrorExt, Result};
pub use settings::{EncryptionSettings, EncryptionSettingsBuilder, Platform};
