use super::RunLock;
use crate::DbaError;
use tempfile::TempDir;

#[test]
fn test_acquire_records_holder_pid() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".backup.lock");

    let lock = RunLock::acquire(&path).unwrap();
    assert_eq!(lock.path(), path);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.trim(), std::process::id().to_string());
}

#[test]
fn test_second_acquire_is_rejected_while_held() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".backup.lock");

    let _held = RunLock::acquire(&path).unwrap();

    let err = RunLock::acquire(&path).unwrap_err();
    assert!(matches!(err, DbaError::BackupInProgress(_)));
    assert!(err.to_string().contains("already running"));
}

#[test]
fn test_drop_releases_the_lock() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".backup.lock");

    let first = RunLock::acquire(&path).unwrap();
    drop(first);

    RunLock::acquire(&path).unwrap();
}

#[test]
fn test_lock_file_survives_release() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".backup.lock");

    drop(RunLock::acquire(&path).unwrap());
    assert!(path.exists());
}
