use std::fs;

use epi_core::EpiError;
use epi_store::ensure_directory;
use tempfile::tempdir;

#[test]
fn creates_nested_directories() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("a").join("b").join("c");
    let created = ensure_directory(&target).unwrap();
    assert!(created.is_dir());
    assert!(created.is_absolute());
}

#[test]
fn repeated_calls_return_the_same_path() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("evolutions");
    let first = ensure_directory(&target).unwrap();
    fs::write(first.join("keep"), b"data").unwrap();
    let second = ensure_directory(&target).unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(second.join("keep")).unwrap(), b"data");
}

#[test]
fn file_in_the_way_is_not_a_directory() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"").unwrap();

    let err = ensure_directory(&blocker.join("inner")).unwrap_err();
    assert!(matches!(err, EpiError::NotADirectory(_)));
    assert_eq!(
        err.info().context.get("path").map(String::as_str),
        Some(blocker.display().to_string().as_str())
    );

    let err = ensure_directory(&blocker).unwrap_err();
    assert_eq!(err.code(), "not-a-directory");
    assert!(blocker.is_file());
}

#[cfg(unix)]
#[test]
fn read_only_parent_is_permission_denied() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o500)).unwrap();

    // privileged users bypass mode bits
    if fs::write(locked.join("canary"), b"").is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o700)).unwrap();
        return;
    }

    let result = ensure_directory(&locked.join("child"));
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o700)).unwrap();

    let err = result.unwrap_err();
    assert!(matches!(err, EpiError::PermissionDenied(_)));
    assert_eq!(err.code(), "permission-denied");
    assert!(!locked.join("child").exists());
}

#[cfg(unix)]
#[test]
fn unwritable_leaf_is_permission_denied() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let leaf = dir.path().join("leaf");
    fs::create_dir(&leaf).unwrap();
    fs::set_permissions(&leaf, fs::Permissions::from_mode(0o500)).unwrap();

    if fs::write(leaf.join("canary"), b"").is_ok() {
        fs::set_permissions(&leaf, fs::Permissions::from_mode(0o700)).unwrap();
        return;
    }

    let result = ensure_directory(&leaf);
    fs::set_permissions(&leaf, fs::Permissions::from_mode(0o700)).unwrap();
    assert_eq!(result.unwrap_err().code(), "permission-denied");
}
