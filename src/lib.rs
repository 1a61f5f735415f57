//! Build-time asset pipeline for hybrid mobile apps.
//!
//! This library provides the two steps run over a prepared platform `www/`
//! folder before the native build packages it:
//! - A deterministic CRC-32 fingerprint with its `filelist` manifest and
//!   generated `checksum.js` script
//! - Zip, encryption and chunking of the folder into an opaque bundle
//!
//! It can be used both through the `asset-checksum` and `asset-encrypt` tools
//! and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
