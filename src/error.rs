//! Error types for the command line tools.
//!
//! Library failures arrive as [`crate::bundler::Error`]; this layer adds the
//! tool-level failures and maps every error onto a process exit code.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for the command line tools
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument and layout errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Pipeline errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// A path given on the command line, or derived from it, does not exist
    #[error("{} does not exist", path.display())]
    MissingPath {
        /// Path that was checked
        path: PathBuf,
    },

    /// Platform identifier outside the supported set
    #[error("Non existent platform '{platform}'")]
    UnknownPlatform {
        /// Identifier as given
        platform: String,
    },

    /// The prepared `www/` folder lacks the checksum script folder
    #[error("Checksum script folder {} does not exist", path.display())]
    MissingChecksumFolder {
        /// Expected folder
        path: PathBuf,
    },

    /// The checksum script could not be written
    #[error("Unable to create checksum.js for '{platform}' in {}", path.display())]
    ArtifactWriteFailed {
        /// Platform being processed
        platform: String,
        /// Folder the script was written to
        path: PathBuf,
    },
}

impl BundlerError {
    /// Exit code reported by the checksum tool for this error.
    ///
    /// A missing checksum script folder gets its own code so callers can tell a
    /// bad output layout from a bad input path.
    pub fn checksum_exit_code(&self) -> i32 {
        match self {
            BundlerError::Cli(CliError::MissingChecksumFolder { .. }) => -2,
            _ => -1,
        }
    }

    /// Exit code reported by the encryption tool for this error.
    pub fn encrypt_exit_code(&self) -> i32 {
        1
    }
}
