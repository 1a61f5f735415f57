//! Error types for the asset pipelines.
//!
//! Every failure carries enough context (what was being done, on which path)
//! to be reported verbatim by the command line tools.

use std::{fmt::Display, io, path::PathBuf};
use thiserror::Error as DeriveError;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the checksum and encryption pipelines.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// An error with an additional context message.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// File system failure annotated with the operation and path.
    #[error("{context} {}: {error}", path.display())]
    Fs {
        /// What was being done when the failure happened.
        context: &'static str,
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying error.
        error: io::Error,
    },

    /// Unannotated I/O error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Directory traversal failure.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Zip archive failure.
    #[error("zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Serialization failure while rendering a generated artifact.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A path found while walking did not sit under the walk root.
    #[error("failed to strip walk root from path: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Block cipher padding or unpadding failure.
    #[error("cipher error: {0}")]
    Cipher(String),

    /// The encrypted bundle would need more chunk files than the naming scheme allows.
    #[error("bundle needs {chunks} chunks but at most {limit} are supported; increase the chunk size")]
    ChunkLimit {
        /// Number of chunks the split would produce.
        chunks: u64,
        /// Largest supported chunk number.
        limit: u64,
    },

    /// A chunk size of zero was requested.
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,

    /// The requested chunk size overflows when converted to bytes.
    #[error("chunk size of {size_kb} KB is too large")]
    ChunkSizeTooLarge {
        /// Requested size in KB.
        size_kb: u64,
    },

    /// Commit of staged output failed after the source folder was emptied.
    #[error(
        "failed to commit encrypted bundle into {}; original assets were kept in {}: {error}",
        target.display(),
        backup.display()
    )]
    CommitFailed {
        /// Asset folder being replaced.
        target: PathBuf,
        /// Folder holding the original assets.
        backup: PathBuf,
        /// Underlying failure.
        error: Box<Self>,
    },

    /// Catch-all error.
    #[error("{0}")]
    GenericError(String),
}

/// Convenient conversion of I/O results into annotated pipeline errors.
pub trait ErrorExt<T> {
    /// Attach the operation name and path to an I/O failure.
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Adds context to results and options.
pub trait Context<T> {
    /// Wrap the error value with additional context.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Wrap the error value with additional context that is lazily evaluated.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Return early with a [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError($msg.into()))
    };
    ($err:expr $(,)?) => {
        return Err($crate::bundler::Error::GenericError($err.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

/// Converts a panicked or cancelled blocking task into a pipeline error.
pub(crate) fn join_error(task: &str, e: tokio::task::JoinError) -> Error {
    Error::GenericError(format!("{task} task panicked: {e}"))
}
