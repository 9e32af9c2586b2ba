use fs2::FileExt;
use std::{
    fs::{self, File, OpenOptions},
    io,
    path::{Path, PathBuf},
    thread,
    time::{Duration, Instant},
};

use crate::error::Error;

/// RAII guard for the store-wide exclusive lock held during mutating commands.
///
/// Advisory only: concurrent edits from two processes that skip the lock fall
/// back to last-write-wins full-document replacement, which is the accepted
/// model for this tool.
#[derive(Debug)]
pub struct StoreLock {
    file: File,
    path: PathBuf,
}

impl StoreLock {
    /// Acquire an exclusive advisory lock on the lock path, polling until
    /// `timeout` elapses.
    pub fn acquire(path: &Path, timeout: Duration) -> Result<Self, Error> {
        let parent = path.parent().ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                "lock path has no parent",
            ))
        })?;
        fs::create_dir_all(parent)?;

        let start = Instant::now();
        loop {
            let file = OpenOptions::new()
                .create(true)
                .read(true)
                .write(true)
                .truncate(false)
                .open(path)?;

            if file.try_lock_exclusive().is_ok() {
                return Ok(Self {
                    file,
                    path: path.to_path_buf(),
                });
            }

            if start.elapsed() >= timeout {
                return Err(Error::LockTimeout {
                    path: path.to_path_buf(),
                    waited: start.elapsed(),
                });
            }

            thread::sleep(Duration::from_millis(10));
        }
    }

    /// Explicitly release the lock. Release also happens automatically on drop.
    pub fn release(self) {
        let _ = self.file.unlock();
    }

    /// Return the lock file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

#[cfg(test)]
mod tests {
    use super::StoreLock;
    use crate::error::{Error, ErrorCode};
    use std::time::Duration;

    #[test]
    fn lock_allows_acquire_and_release() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.lock");
        let lock = StoreLock::acquire(&path, Duration::from_millis(50)).expect("acquire");
        assert_eq!(lock.path(), path.as_path());
        lock.release();
    }

    #[test]
    fn lock_times_out_when_held() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.lock");
        let _guard = StoreLock::acquire(&path, Duration::from_millis(50)).expect("first acquire");

        let err = StoreLock::acquire(&path, Duration::from_millis(20))
            .expect_err("second acquire must time out");
        assert!(matches!(err, Error::LockTimeout { path: p, .. } if p == path));
    }

    #[test]
    fn lock_timeout_maps_to_machine_code() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.lock");
        let _guard = StoreLock::acquire(&path, Duration::from_millis(50)).expect("acquire");

        let err = StoreLock::acquire(&path, Duration::from_millis(10)).expect_err("timeout");
        assert_eq!(err.code(), ErrorCode::LockContention);
        assert!(err.hint().is_some());
    }

    #[test]
    fn release_allows_follow_up_lock() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.lock");
        {
            let _first = StoreLock::acquire(&path, Duration::from_millis(50)).expect("first");
        }
        let _second = StoreLock::acquire(&path, Duration::from_millis(50)).expect("second");
    }
}
