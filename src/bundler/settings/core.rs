//! Encryption pipeline settings.

use super::{DEFAULT_SPLIT_SIZE_KB, EncryptionSettingsBuilder};
use crate::bundler::CipherProfile;

/// Settings for one run of the bundle encryption pipeline.
///
/// Constructed via [`EncryptionSettingsBuilder`], which validates the chunk size.
///
/// # Examples
///
/// ```
/// use hybrid_asset_bundler::bundler::EncryptionSettings;
///
/// # fn example() -> hybrid_asset_bundler::bundler::Result<()> {
/// let settings = EncryptionSettings::builder()
///     .split_file(true)
///     .split_size_kb(512)
///     .build()?;
/// assert_eq!(settings.chunk_size_bytes(), 512 * 1024);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptionSettings {
    /// Split the encrypted bundle into numbered chunk files.
    split_file: bool,

    /// Maximum chunk size in KB (1024 bytes).
    split_size_kb: u64,

    /// `split_size_kb` in bytes, checked for overflow by the builder.
    chunk_size_bytes: u64,

    /// Cipher profile chosen by the caller.
    ///
    /// None means the profile is inferred from the folder layout.
    profile: Option<CipherProfile>,
}

impl Default for EncryptionSettings {
    fn default() -> Self {
        Self {
            split_file: false,
            split_size_kb: DEFAULT_SPLIT_SIZE_KB,
            chunk_size_bytes: DEFAULT_SPLIT_SIZE_KB * 1024,
            profile: None,
        }
    }
}

impl EncryptionSettings {
    /// Starts a new settings builder.
    pub fn builder() -> EncryptionSettingsBuilder {
        EncryptionSettingsBuilder::new()
    }

    /// Whether the encrypted bundle is split into chunks.
    pub fn split_file(&self) -> bool {
        self.split_file
    }

    /// Maximum chunk size in KB.
    pub fn split_size_kb(&self) -> u64 {
        self.split_size_kb
    }

    /// Maximum chunk size in bytes.
    pub fn chunk_size_bytes(&self) -> u64 {
        self.chunk_size_bytes
    }

    /// Explicit cipher profile, if one was chosen.
    pub fn profile(&self) -> Option<CipherProfile> {
        self.profile
    }

    pub(super) fn new(
        split_file: bool,
        split_size_kb: u64,
        chunk_size_bytes: u64,
        profile: Option<CipherProfile>,
    ) -> Self {
        Self {
            split_file,
            split_size_kb,
            chunk_size_bytes,
            profile,
        }
    }
}
