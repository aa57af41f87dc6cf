use fpm_fs::{NormalizedPath, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file_and_parents() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("nested/dir/framerpkg.json"));

    io::write_atomic(&path, b"{}").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "{}");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("origin-cache.json");
    fs::write(&file_path, "original").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_atomic(&path, b"updated").unwrap();

    let content = fs::read_to_string(&file_path).unwrap();
    assert_eq!(content, "updated");
}

#[test]
fn test_read_text_nonexistent_file() {
    let path = NormalizedPath::new("/nonexistent/file.json");
    let result = io::read_text(&path);
    assert!(matches!(result, Err(fpm_fs::Error::Io { .. })));
}

#[test]
fn test_write_text_then_read_text() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("info.json"));

    io::write_text(&path, "{\"author\": \"me\"}").unwrap();

    assert_eq!(io::read_text(&path).unwrap(), "{\"author\": \"me\"}");
}
