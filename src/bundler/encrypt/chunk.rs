//! Splitting an encrypted bundle into numbered chunk files.
//!
//! Chunks are named `<file name>.NNN` with a three digit, zero padded
//! sequence number starting at `001`.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::MAX_CHUNKS,
};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Path of chunk number `index` (1-based) of `file_path`.
pub fn chunk_path(file_path: &Path, index: u64) -> PathBuf {
    let mut name = file_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{index:03}"));
    file_path.with_file_name(name)
}

/// Number of chunks needed for `len` bytes; zero bytes still produce one chunk.
pub fn chunk_count(len: u64, chunk_size: u64) -> u64 {
    len.div_ceil(chunk_size).max(1)
}

/// Splits `file_path` into chunk files of at most `chunk_size` bytes next to it.
///
/// The original file is left in place. Fails before writing anything when the
/// split would need more than [`MAX_CHUNKS`] files.
pub async fn split_file_into_chunks(file_path: &Path, chunk_size: u64) -> Result<Vec<PathBuf>> {
    if chunk_size == 0 {
        return Err(Error::InvalidChunkSize);
    }

    let len = tokio::fs::metadata(file_path)
        .await
        .fs_context("reading bundle metadata", file_path)?
        .len();
    let chunks = chunk_count(len, chunk_size);
    if chunks > MAX_CHUNKS {
        return Err(Error::ChunkLimit {
            chunks,
            limit: MAX_CHUNKS,
        });
    }
    log::debug!(
        "Splitting {} ({len} bytes) into {chunks} files of at most {chunk_size} bytes",
        file_path.display()
    );

    let mut source = tokio::fs::File::open(file_path)
        .await
        .fs_context("opening bundle", file_path)?;
    let mut paths = Vec::with_capacity(chunks as usize);
    for index in 1..=chunks {
        let target = chunk_path(file_path, index);
        let mut writer = tokio::io::BufWriter::new(
            tokio::fs::File::create(&target)
                .await
                .fs_context("creating chunk", &target)?,
        );
        let written = tokio::io::copy(&mut (&mut source).take(chunk_size), &mut writer)
            .await
            .fs_context("writing chunk", &target)?;
        writer
            .flush()
            .await
            .fs_context("flushing chunk", &target)?;

        log::trace!("wrote {written} bytes to {}", target.display());
        paths.push(target);
    }

    Ok(paths)
}

/// Concatenates `<file_path>.001`, `.002`, ... into `output`.
///
/// Stops at the first missing sequence number and returns how many chunks were joined.
pub async fn join_chunks(file_path: &Path, output: &Path) -> Result<u64> {
    let mut writer = tokio::io::BufWriter::new(
        tokio::fs::File::create(output)
            .await
            .fs_context("creating joined bundle", output)?,
    );

    let mut joined = 0;
    for index in 1..=MAX_CHUNKS {
        let chunk = chunk_path(file_path, index);
        let mut reader = match tokio::fs::File::open(&chunk).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => break,
            Err(e) => return Err(e).fs_context("opening chunk", &chunk),
        };
        tokio::io::copy(&mut reader, &mut writer)
            .await
            .fs_context("joining chunk", &chunk)?;
        joined += 1;
    }

    writer
        .flush()
        .await
        .fs_context("flushing joined bundle", output)?;
    Ok(joined)
}
