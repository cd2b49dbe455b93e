use std::{fs, io, path::PathBuf};

#[derive(Debug)]
pub(crate) enum LockError {
    // the sidecar already exists, somebody else holds the location
    Held,
    Io(io::Error),
}

/// Advisory per-location lock: a sidecar file created atomically and removed
/// on drop. Guards only cooperating sessions of this crate; a crashed holder
/// leaves the sidecar behind and the location reads as held until it is
/// cleaned up.
#[derive(Debug)]
pub(crate) struct LockGuard {
    path: PathBuf,
}

impl LockGuard {
    pub(crate) fn try_acquire(path: PathBuf) -> Result<Self, LockError> {
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(_) => Ok(Self { path }),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(LockError::Held),
            Err(e) => Err(LockError::Io(e)),
        }
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[test]
fn acquire_is_exclusive_until_dropped() {
    let dir = tempfile::tempdir().expect("create temp dir must succeed");
    let lock_path = dir.path().join("note.json.lock");

    let guard = LockGuard::try_acquire(lock_path.clone()).expect("first acquire must succeed");
    assert!(matches!(
        LockGuard::try_acquire(lock_path.clone()),
        Err(LockError::Held)
    ));

    drop(guard);
    // sidecar is gone, the location can be taken again
    assert!(!lock_path.exists());
    LockGuard::try_acquire(lock_path).expect("acquire after release must succeed");
}
