//! Configuration for the asset pipelines.
//!
//! This module provides the platform layout, the encryption settings with
//! their builder, and the well-known file names shared with the mobile runtime.

mod builder;
mod core;
mod platform;

pub use builder::EncryptionSettingsBuilder;
pub use core::EncryptionSettings;
pub use platform::Platform;

/// Name of the zipped, not yet encrypted bundle.
pub const UNENCRYPTED_BUNDLE_NAME: &str = "resources.zip.unencrypted";

/// Name of the encrypted bundle; chunks append `.NNN`.
pub const ENCRYPTED_BUNDLE_NAME: &str = "resources.zip";

/// Default chunk size in KB, sized for a historical mobile OS asset ceiling.
pub const DEFAULT_SPLIT_SIZE_KB: u64 = 768;

/// Highest chunk number expressible in the three digit suffix.
pub const MAX_CHUNKS: u64 = 999;

/// Name of the manifest written at the top of a checksummed folder.
pub const FILELIST_NAME: &str = "filelist";

/// Name of the generated checksum script.
pub const CHECKSUM_ARTIFACT_NAME: &str = "checksum.js";

/// Global identifier assigned by the generated checksum script.
pub const CHECKSUM_GLOBAL: &str = "WL_CHECKSUM";

/// File names never included in the checksum, matched against the last path component.
pub const CHECKSUM_EXCLUDES: [&str; 7] = [
    "skinLoader.js",
    CHECKSUM_ARTIFACT_NAME,
    ".DS_Store",
    ".jazzignore",
    ".gitignore",
    ".gitattributes",
    "Thumbs.db",
];
