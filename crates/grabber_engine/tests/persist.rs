use std::fs;

use grabber_engine::{check_destination, PersistError};
use tempfile::TempDir;

#[test]
fn existing_writable_dir_passes_and_leaves_no_probe() {
    let temp = TempDir::new().unwrap();
    check_destination(temp.path()).unwrap();
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn missing_dir_is_rejected_and_not_created() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("out");

    let err = check_destination(&missing).unwrap_err();
    assert!(matches!(err, PersistError::Missing(_)), "{err:?}");
    assert!(!missing.exists());
}

#[test]
fn file_is_not_a_destination() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let err = check_destination(&file_path).unwrap_err();
    assert!(matches!(err, PersistError::NotADirectory(_)), "{err:?}");
    assert!(err.to_string().contains("not_a_dir"));
}
