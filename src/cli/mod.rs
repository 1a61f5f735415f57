//! Command line interface for the asset tools.
//!
//! Each tool parses its arguments, runs its pipeline and converts every
//! failure into a process exit code. Nothing escapes as a panic.

mod args;

pub use args::{ChecksumArgs, EncryptArgs};

use crate::bundler::{
    EncryptionSettings, FolderResult, Platform, compute_folder_checksum, encrypt_bundle,
    write_checksum_artifact,
};
use crate::error::{BundlerError, CliError, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Initializes `env_logger` at the level selected by the verbosity flags.
///
/// `RUST_LOG` takes precedence over the flags.
pub fn init_logging(debug: bool, ddebug: bool) {
    let level = if ddebug {
        "trace"
    } else if debug {
        "debug"
    } else {
        "info"
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

/// Checksum tool entry point; returns the process exit code.
pub async fn run_checksum() -> i32 {
    let args = match ChecksumArgs::try_parse() {
        Ok(args) => args,
        Err(e) => return clap_exit_code(e, BundlerError::checksum_exit_code),
    };
    init_logging(args.debug, args.ddebug);
    log::trace!("opts = {args:?}");

    match checksum_command(&args).await {
        Ok(()) => 0,
        Err(e) => {
            let code = e.checksum_exit_code();
            log::error!("{e}");
            log::debug!("Exiting with failure exit code: {code} ({e:?})");
            code
        }
    }
}

/// Encryption tool entry point; returns the process exit code.
pub async fn run_encrypt() -> i32 {
    let args = match EncryptArgs::try_parse() {
        Ok(args) => args,
        Err(e) => return clap_exit_code(e, BundlerError::encrypt_exit_code),
    };
    init_logging(args.debug, args.ddebug);
    log::trace!("opts = {args:?}");

    match encrypt_command(&args).await {
        Ok(outputs) => {
            for output in outputs {
                log::debug!("  {}", output.display());
            }
            0
        }
        Err(e) => {
            let code = e.encrypt_exit_code();
            log::error!("{e}");
            log::debug!("Exiting with failure exit code: {code} ({e:?})");
            code
        }
    }
}

/// Checksums one platform of the app at `app_root` and writes its `checksum.js`.
///
/// The checksum script folder must already exist inside the platform `www/`
/// folder; its absence is reported as [`CliError::MissingChecksumFolder`].
pub async fn checksum_platform(app_root: &Path, platform: Platform) -> Result<FolderResult> {
    log::debug!("Calculating checksum for platform '{platform}'");
    let www = app_root.join(platform.www_dir());
    if !path_exists(&www).await {
        return Err(CliError::MissingPath { path: www }.into());
    }

    let result = compute_folder_checksum(&www).await?;
    log::info!(
        "Platform {platform} checksum = {} size = {}",
        result.checksum,
        result.size
    );

    let artifact_dir = app_root.join(platform.checksum_artifact_dir());
    if !path_exists(&artifact_dir).await {
        return Err(CliError::MissingChecksumFolder { path: artifact_dir }.into());
    }
    if !write_checksum_artifact(result.checksum, &artifact_dir).await {
        return Err(CliError::ArtifactWriteFailed {
            platform: platform.to_string(),
            path: artifact_dir,
        }
        .into());
    }
    log::debug!("Platform {platform} checksum file created");

    Ok(result)
}

async fn checksum_command(args: &ChecksumArgs) -> Result<()> {
    require_path(&args.path).await?;

    let ids = args.platform_ids();
    if ids.is_empty() {
        log::info!("No platforms specified");
        return Ok(());
    }

    for id in ids {
        let platform: Platform = id
            .parse()
            .map_err(|_| CliError::UnknownPlatform { platform: id })?;
        checksum_platform(&args.path, platform).await?;
    }
    Ok(())
}

async fn encrypt_command(args: &EncryptArgs) -> Result<Vec<PathBuf>> {
    require_path(&args.path).await?;

    let mut builder = EncryptionSettings::builder()
        .split_file(args.chunk)
        .split_size_kb(args.size);
    if let Some(profile) = args.profile {
        builder = builder.profile(profile);
    }
    let settings = builder.build()?;

    let outputs = encrypt_bundle(&args.path, &settings).await?;
    Ok(outputs)
}

async fn path_exists(path: &Path) -> bool {
    tokio::fs::metadata(path).await.is_ok()
}

async fn require_path(path: &Path) -> Result<()> {
    if path_exists(path).await {
        Ok(())
    } else {
        Err(CliError::MissingPath {
            path: path.to_path_buf(),
        }
        .into())
    }
}

/// Prints a clap parse outcome; help and version exit cleanly.
fn clap_exit_code(e: clap::Error, exit_code: fn(&BundlerError) -> i32) -> i32 {
    let _ = e.print();
    if !e.use_stderr() {
        return 0;
    }
    let err = BundlerError::from(CliError::InvalidArguments {
        reason: e.kind().to_string(),
    });
    exit_code(&err)
}
