//! Zip archive of a bundle folder.

use crate::bundler::error::{ErrorExt, Result, join_error};
use std::{
    fs::File,
    io::{self, BufWriter},
    path::Path,
};
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter, write::SimpleFileOptions};

/// Zips the entire contents of `folder` into `zip_path`.
///
/// Entries are stored at their `/`-separated path relative to `folder`, in
/// sorted order, with a fixed timestamp so an unchanged folder always produces
/// the same archive. Empty directories are kept as directory entries.
/// `zip_path` must not be inside `folder`.
pub async fn zip_folder_contents(folder: &Path, zip_path: &Path) -> Result<()> {
    log::debug!(
        "Zipping folder {} into {}",
        folder.display(),
        zip_path.display()
    );
    let folder = folder.to_path_buf();
    let zip_path = zip_path.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        let file = File::create(&zip_path).fs_context("creating archive", &zip_path)?;
        let mut zip = ZipWriter::new(BufWriter::new(file));
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        let walker = walkdir::WalkDir::new(&folder)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry?;
            let name = entry
                .path()
                .strip_prefix(&folder)?
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            if entry.file_type().is_dir() {
                zip.add_directory(name, options)?;
            } else if entry.file_type().is_file() {
                log::trace!("adding {name}");
                let mut source =
                    File::open(entry.path()).fs_context("opening asset", entry.path())?;
                zip.start_file(name, options)?;
                io::copy(&mut source, &mut zip).fs_context("archiving asset", entry.path())?;
            }
        }

        let mut writer = zip.finish()?;
        io::Write::flush(&mut writer).fs_context("flushing archive", &zip_path)?;
        Ok(())
    })
    .await
    .map_err(|e| join_error("zip", e))?
}

/// Extracts `zip_path` into `dest`, refusing entries that would escape it.
pub async fn extract_archive(zip_path: &Path, dest: &Path) -> Result<()> {
    let zip_path = zip_path.to_path_buf();
    let dest = dest.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        let file = File::open(&zip_path).fs_context("opening archive", &zip_path)?;
        let mut archive = ZipArchive::new(file)?;
        archive.extract(&dest)?;
        Ok(())
    })
    .await
    .map_err(|e| join_error("unzip", e))?
}
