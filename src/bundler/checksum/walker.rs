//! Recursive listing of the regular files under a folder.

use crate::bundler::error::{ErrorExt, Result, join_error};
use std::path::{Path, PathBuf};

/// A regular file found under the walk root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the root in manifest form: leading `/`, `/` separators.
    pub relative_path: String,
    /// Absolute path used to read the content.
    pub path: PathBuf,
}

impl FileEntry {
    /// Last component of the relative path.
    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path)
    }

    /// Reads the raw content of the file.
    pub async fn read(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .fs_context("reading asset", &self.path)
    }
}

/// Lists every regular file below `root`, recursing into subdirectories.
///
/// Symbolic links are followed and classified by their target. The returned
/// order is traversal order and carries no meaning; callers sort as needed.
///
/// A symlink cycle is reported as a traversal error.
pub async fn list_files(root: &Path) -> Result<Vec<FileEntry>> {
    let root = root.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<Vec<FileEntry>> {
        let mut files = Vec::new();
        for entry in walkdir::WalkDir::new(&root).min_depth(1).follow_links(true) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel_path = entry.path().strip_prefix(&root)?;
            files.push(FileEntry {
                relative_path: manifest_path(rel_path),
                path: entry.path().to_path_buf(),
            });
        }
        Ok(files)
    })
    .await
    .map_err(|e| join_error("directory walk", e))?
}

/// Renders a relative path in manifest form regardless of host separator.
pub fn manifest_path(rel_path: &Path) -> String {
    let mut out = String::new();
    for component in rel_path.components() {
        out.push('/');
        out.push_str(&component.as_os_str().to_string_lossy());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_path_has_leading_separator() {
        let rel = Path::new("js").join("lib").join("app.js");
        assert_eq!(manifest_path(&rel), "/js/lib/app.js");
        assert_eq!(manifest_path(Path::new("index.html")), "/index.html");
    }

    #[tokio::test]
    async fn lists_nested_files_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("a/b/empty")).unwrap();
        std::fs::write(dir.path().join("top.txt"), b"1").unwrap();
        std::fs::write(dir.path().join("a/b/deep.txt"), b"2").unwrap();

        let mut names: Vec<_> = list_files(dir.path())
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.relative_path)
            .collect();
        names.sort();

        assert_eq!(names, vec!["/a/b/deep.txt", "/top.txt"]);
    }

    #[test]
    fn file_name_is_last_component() {
        let entry = FileEntry {
            relative_path: "/css/.DS_Store".into(),
            path: PathBuf::from("/x/css/.DS_Store"),
        };
        assert_eq!(entry.file_name(), ".DS_Store");
    }
}
