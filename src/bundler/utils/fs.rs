//! File system utilities for the asset pipelines.
//!
//! Provides move/remove operations with implicit parent directory creation,
//! idempotent cleanup and annotated errors.

use crate::bundler::error::{ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Moves a file or directory, creating any parent directories of the destination.
///
/// Uses a rename, which is atomic on a single file system. Regular files are
/// copied and removed when the rename crosses devices.
pub async fn move_path(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)
            .await
            .fs_context("creating destination directory", parent)?;
    }

    match fs::rename(from, to).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices && from.is_file() => {
            log::trace!(
                "rename {} -> {} crosses devices, copying",
                from.display(),
                to.display()
            );
            fs::copy(from, to).await.fs_context("copying file", to)?;
            fs::remove_file(from)
                .await
                .fs_context("removing moved file", from)
        }
        Err(e) => Err(e).fs_context("moving", from),
    }
}

/// Moves every entry of `from` into `to`, leaving `from` empty.
///
/// `to` is created if it does not exist.
pub async fn move_dir_contents(from: &Path, to: &Path) -> Result<()> {
    fs::create_dir_all(to)
        .await
        .fs_context("creating directory", to)?;

    let mut entries = fs::read_dir(from)
        .await
        .fs_context("reading directory", from)?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("reading directory entry", from)?
    {
        let dest = to.join(entry.file_name());
        log::trace!("moving {} -> {}", entry.path().display(), dest.display());
        move_path(&entry.path(), &dest).await?;
    }
    Ok(())
}

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Clears the read-only state of an existing file so it can be overwritten.
///
/// On unix this sets the owner write bit whenever it is missing.
///
/// A missing file is not an error. Build tools sometimes mark their
/// previous outputs read-only.
pub async fn ensure_writable(path: &Path) -> Result<()> {
    let metadata = match fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e).fs_context("reading metadata", path),
    };

    let mut permissions = metadata.permissions();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = permissions.mode();
        if mode & 0o200 != 0 {
            return Ok(());
        }
        permissions.set_mode(mode | 0o200);
    }
    #[cfg(not(unix))]
    {
        if !permissions.readonly() {
            return Ok(());
        }
        #[allow(clippy::permissions_set_readonly_false)]
        permissions.set_readonly(false);
    }

    log::trace!("making {} writable", path.display());
    fs::set_permissions(path, permissions)
        .await
        .fs_context("clearing read-only flag", path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn move_path_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.txt");
        std::fs::write(&src, b"payload").unwrap();
        let dest = dir.path().join("nested/deeper/a.txt");

        move_path(&src, &dest).await.unwrap();

        assert!(!src.exists());
        assert_eq!(std::fs::read(&dest).unwrap(), b"payload");
    }

    #[tokio::test]
    async fn move_dir_contents_empties_source() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("from");
        std::fs::create_dir_all(from.join("sub")).unwrap();
        std::fs::write(from.join("x"), b"1").unwrap();
        std::fs::write(from.join("sub/y"), b"2").unwrap();
        let to = dir.path().join("to");

        move_dir_contents(&from, &to).await.unwrap();

        assert_eq!(std::fs::read_dir(&from).unwrap().count(), 0);
        assert_eq!(std::fs::read(to.join("sub/y")).unwrap(), b"2");
    }

    #[tokio::test]
    async fn remove_dir_all_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing");
        remove_dir_all(&target).await.unwrap();
        create_dir_all(&target, true).await.unwrap();
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn ensure_writable_clears_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("checksum.js");
        std::fs::write(&file, b"old").unwrap();
        let mut perms = std::fs::metadata(&file).unwrap().permissions();
        perms.set_readonly(true);
        std::fs::set_permissions(&file, perms).unwrap();

        ensure_writable(&file).await.unwrap();

        assert!(!std::fs::metadata(&file).unwrap().permissions().readonly());
        ensure_writable(&dir.path().join("absent.js")).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn ensure_writable_sets_owner_write_bit() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("checksum.js");
        std::fs::write(&file, b"old").unwrap();
        std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o464)).unwrap();

        ensure_writable(&file).await.unwrap();

        let mode = std::fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o664);
    }
}
