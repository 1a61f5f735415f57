//! Builder for constructing EncryptionSettings.

use super::{DEFAULT_SPLIT_SIZE_KB, EncryptionSettings};
use crate::bundler::{CipherProfile, Error};

/// Builder for constructing [`EncryptionSettings`].
///
/// # Examples
///
/// ```
/// use hybrid_asset_bundler::bundler::{CipherProfile, EncryptionSettingsBuilder};
///
/// # fn example() -> hybrid_asset_bundler::bundler::Result<()> {
/// let settings = EncryptionSettingsBuilder::new()
///     .profile(CipherProfile::Aes256Cbc)
///     .split_file(true)
///     .build()?;
/// assert_eq!(settings.split_size_kb(), 768);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct EncryptionSettingsBuilder {
    split_file: bool,
    split_size_kb: Option<u64>,
    profile: Option<CipherProfile>,
}

impl EncryptionSettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Enables or disables chunk splitting.
    ///
    /// Default: false
    pub fn split_file(mut self, split: bool) -> Self {
        self.split_file = split;
        self
    }

    /// Sets the maximum chunk size in KB.
    ///
    /// Default: 768
    pub fn split_size_kb(mut self, size_kb: u64) -> Self {
        self.split_size_kb = Some(size_kb);
        self
    }

    /// Sets the cipher profile explicitly.
    ///
    /// Default: None (inferred from the `www/` folder's location)
    pub fn profile(mut self, profile: CipherProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChunkSize`] when the chunk size is zero and
    /// [`Error::ChunkSizeTooLarge`] when it does not fit in bytes.
    pub fn build(self) -> crate::bundler::Result<EncryptionSettings> {
        let split_size_kb = self.split_size_kb.unwrap_or(DEFAULT_SPLIT_SIZE_KB);
        if split_size_kb == 0 {
            return Err(Error::InvalidChunkSize);
        }
        let chunk_size_bytes = split_size_kb
            .checked_mul(1024)
            .ok_or(Error::ChunkSizeTooLarge { size_kb: split_size_kb })?;

        Ok(EncryptionSettings::new(
            self.split_file,
            split_size_kb,
            chunk_size_bytes,
            self.profile,
        ))
    }
}
