use super::{copy_idle, gzip_max, remove_if_present, truncate};
use crate::DbaError;
use flate2::read::GzDecoder;
use std::fs;
use std::io::Read;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use tempfile::TempDir;

#[test]
fn test_copy_idle_preserves_content_and_mode() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("dump.rdb");
    let dst = dir.path().join("copy.rdb");

    fs::write(&src, b"REDIS0009\x00payload").unwrap();
    fs::set_permissions(&src, fs::Permissions::from_mode(0o600)).unwrap();

    let bytes = copy_idle(&src, &dst).unwrap();

    assert_eq!(bytes, 17);
    assert_eq!(fs::read(&dst).unwrap(), b"REDIS0009\x00payload");
    assert_eq!(
        fs::metadata(&dst).unwrap().permissions().mode() & 0o777,
        0o600
    );
}

#[test]
fn test_copy_idle_missing_source_is_an_error() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("absent");
    let dst = dir.path().join("copy");

    let err = copy_idle(&src, &dst).unwrap_err();
    match err {
        DbaError::Fs { op, path, .. } => {
            assert_eq!(op, "copy");
            assert_eq!(path, src);
        }
        other => panic!("expected Fs error, got: {other:?}"),
    }
}

#[test]
fn test_gzip_max_output_decodes_to_the_input() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("appendonly.aof");
    let dst = dir.path().join("appendonly.aof.gz");

    let payload = b"*3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$5\r\nvalue\r\n".repeat(64);
    fs::write(&src, &payload).unwrap();

    let bytes = gzip_max(&src, &dst).unwrap();
    assert_eq!(bytes, payload.len() as u64);

    let mut decoded = Vec::new();
    GzDecoder::new(fs::File::open(&dst).unwrap())
        .read_to_end(&mut decoded)
        .unwrap();
    assert_eq!(decoded, payload);
}

#[test]
fn test_truncate_empties_in_place() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("appendonly.aof");
    fs::write(&path, b"pending commands").unwrap();
    let inode = fs::metadata(&path).unwrap().ino();

    truncate(&path).unwrap();

    let meta = fs::metadata(&path).unwrap();
    assert_eq!(meta.len(), 0);
    assert_eq!(meta.ino(), inode);
}

#[test]
fn test_remove_if_present_tolerates_absence() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("appendonly.aof.gz");

    remove_if_present(&path).unwrap();

    fs::write(&path, b"x").unwrap();
    remove_if_present(&path).unwrap();
    assert!(!path.exists());
}
