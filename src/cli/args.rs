//! Command line argument parsing for both tools.
//!
//! Arguments are parsed with clap; layout validation (paths existing,
//! platforms being known) happens when the command runs.

use crate::bundler::{CipherProfile, settings::DEFAULT_SPLIT_SIZE_KB};
use clap::Parser;
use std::path::PathBuf;

/// Computes the asset checksum of prepared platform folders
#[derive(Parser, Debug)]
#[command(
    name = "asset-checksum",
    version,
    about = "Computes the asset checksum of prepared platform folders",
    long_about = "Walks each platform www/ folder of an app, writes its filelist manifest and
generates the checksum.js script read by the runtime at startup.

Usage:
  asset-checksum --path ./myapp --platforms android,ios

Exit codes: 0 on success, -2 when a www/ folder lacks the checksum script
folder, -1 on any other failure."
)]
pub struct ChecksumArgs {
    /// App root, the folder containing platforms/
    #[arg(short, long, value_name = "DIR")]
    pub path: PathBuf,

    /// Comma separated platforms to process: android, ios, windows
    #[arg(short = 'l', long, value_name = "LIST")]
    pub platforms: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    pub debug: bool,

    /// Very verbose logging
    #[arg(long, alias = "dd")]
    pub ddebug: bool,
}

impl ChecksumArgs {
    /// Platform identifiers in the order given, whitespace trimmed.
    ///
    /// Unknown identifiers are kept so the command can report them in order.
    pub fn platform_ids(&self) -> Vec<String> {
        self.platforms
            .as_deref()
            .map(str::trim)
            .filter(|list| !list.is_empty())
            .map(|list| list.split(',').map(|id| id.trim().to_string()).collect())
            .unwrap_or_default()
    }
}

/// Encrypts a prepared platform folder into an opaque bundle
#[derive(Parser, Debug)]
#[command(
    name = "asset-encrypt",
    version,
    about = "Encrypts a prepared platform www/ folder into an opaque bundle",
    long_about = "Replaces the contents of a platform www/ folder with resources.zip, an encrypted
zip of those contents, optionally split into resources.zip.001, .002, ...

Usage:
  asset-encrypt --path ./platforms/ios/www --chunk --size 768

Exit code 0 on success, 1 on any failure. On failure before the final swap
the folder is left untouched."
)]
pub struct EncryptArgs {
    /// Platform www/ folder to encrypt in place
    #[arg(short, long, value_name = "DIR")]
    pub path: PathBuf,

    /// Split the encrypted bundle into chunks
    #[arg(short, long)]
    pub chunk: bool,

    /// Maximum chunk size in KB
    #[arg(short, long, value_name = "KB", default_value_t = DEFAULT_SPLIT_SIZE_KB)]
    pub size: u64,

    /// Cipher profile: aes256-cbc or aes128-ecb (inferred from the folder layout when omitted)
    #[arg(long, value_name = "PROFILE")]
    pub profile: Option<CipherProfile>,

    /// Verbose logging
    #[arg(short, long)]
    pub debug: bool,

    /// Very verbose logging
    #[arg(long, alias = "dd")]
    pub ddebug: bool,
}
