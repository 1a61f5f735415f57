//! Folder fingerprint behaviour over real directory trees.

use hybrid_asset_bundler::bundler::{
    ChecksumMode, compute_folder_checksum, compute_folder_checksum_with,
};
use std::path::Path;

fn write(root: &Path, rel: &str, contents: &[u8]) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

fn web_tree(root: &Path, line_ending: &str) {
    write(
        root,
        "index.html",
        format!("<html>{line_ending}</html>{line_ending}").as_bytes(),
    );
    write(root, "js/app.js", format!("var a = 1;{line_ending}").as_bytes());
    write(root, "css/main.css", format!("body {{}}{line_ending}").as_bytes());
}

#[tokio::test]
async fn two_file_tree_matches_reference_value() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.txt", b"hello");
    write(dir.path(), "b.txt", b"world");

    let result = compute_folder_checksum(dir.path()).await.unwrap();

    assert_eq!(result.checksum, 2_453_279_707);
    assert_eq!(result.size, 10);
}

#[tokio::test]
async fn nested_tree_matches_reference_value() {
    let dir = tempfile::tempdir().unwrap();
    web_tree(dir.path(), "\n");

    let result = compute_folder_checksum(dir.path()).await.unwrap();

    assert_eq!(result.checksum, 117_987_494);
    assert_eq!(result.size, 34);
}

#[tokio::test]
async fn carriage_returns_change_size_but_not_checksum() {
    let unix = tempfile::tempdir().unwrap();
    let windows = tempfile::tempdir().unwrap();
    web_tree(unix.path(), "\n");
    web_tree(windows.path(), "\r\n");

    let unix = compute_folder_checksum(unix.path()).await.unwrap();
    let windows = compute_folder_checksum(windows.path()).await.unwrap();

    assert_eq!(unix.checksum, windows.checksum);
    assert_eq!(windows.size, 38);
}

#[tokio::test]
async fn rerun_on_unchanged_tree_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    web_tree(dir.path(), "\n");

    let first = compute_folder_checksum(dir.path()).await.unwrap();
    let second = compute_folder_checksum(dir.path()).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn creation_order_does_not_matter() {
    let forward = tempfile::tempdir().unwrap();
    let backward = tempfile::tempdir().unwrap();
    for name in ["a", "b", "c", "d"] {
        write(forward.path(), &format!("{name}.js"), name.as_bytes());
    }
    for name in ["d", "c", "b", "a"] {
        write(backward.path(), &format!("{name}.js"), name.as_bytes());
    }

    assert_eq!(
        compute_folder_checksum(forward.path()).await.unwrap(),
        compute_folder_checksum(backward.path()).await.unwrap()
    );
}

#[tokio::test]
async fn excluded_names_do_not_contribute() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.txt", b"hello");
    write(dir.path(), "b.txt", b"world");
    write(dir.path(), ".DS_Store", b"finder");
    write(dir.path(), "img/Thumbs.db", b"thumbs");
    write(
        dir.path(),
        "plugins/cordova-plugin-mfp/worklight/checksum.js",
        b"var WL_CHECKSUM = {}",
    );
    write(dir.path(), "skinLoader.js", b"skin");

    let result = compute_folder_checksum(dir.path()).await.unwrap();

    assert_eq!(result.checksum, 2_453_279_707);
    assert_eq!(result.size, 10);
    let filelist = std::fs::read_to_string(dir.path().join("filelist")).unwrap();
    assert_eq!(filelist, "/a.txt\n/b.txt");
}

#[tokio::test]
async fn nested_filelist_is_checksummed() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.txt", b"hello");
    write(dir.path(), "b.txt", b"world");
    write(dir.path(), "sub/filelist", b"x");

    let result = compute_folder_checksum(dir.path()).await.unwrap();

    assert_eq!(result.checksum, 374_508_954);
    assert_eq!(result.size, 11);
}

#[tokio::test]
async fn filelist_lists_sorted_forward_slash_paths() {
    let dir = tempfile::tempdir().unwrap();
    web_tree(dir.path(), "\n");

    compute_folder_checksum(dir.path()).await.unwrap();

    let filelist = std::fs::read_to_string(dir.path().join("filelist")).unwrap();
    assert_eq!(filelist, "/css/main.css\n/index.html\n/js/app.js");
}

#[tokio::test]
async fn empty_folder_yields_zero() {
    let dir = tempfile::tempdir().unwrap();

    let result = compute_folder_checksum(dir.path()).await.unwrap();

    assert_eq!(result.checksum, 0);
    assert_eq!(result.size, 0);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("filelist")).unwrap(),
        ""
    );
}

#[tokio::test]
async fn strict_mode_agrees_on_ordinary_trees() {
    let dir = tempfile::tempdir().unwrap();
    web_tree(dir.path(), "\n");

    let compatible = compute_folder_checksum(dir.path()).await.unwrap();
    let strict = compute_folder_checksum_with(dir.path(), ChecksumMode::Strict)
        .await
        .unwrap();

    assert_eq!(compatible, strict);
}

#[tokio::test]
async fn missing_folder_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(
        compute_folder_checksum(&dir.path().join("missing"))
            .await
            .is_err()
    );
}
