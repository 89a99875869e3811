use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

/// Name of the lock file inside the data directory
pub const LOCK_FILE: &str = ".lock";

/// How long writers wait for each other by default
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(2);

const RETRY_INTERVAL: Duration = Duration::from_millis(10);

/// Exclusive advisory lock on a data directory, held while a store file
/// is rewritten. Released when dropped.
///
/// The lock file is left in place: unlinking it while another process is
/// waiting on the old inode would let a third process lock a fresh file and
/// run concurrently with the waiter.
#[derive(Debug)]
pub struct FileLock {
    _file: File,
}

#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not open lock file {path}: {source}")]
    CreateError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path} is still locked after {waited:?}; is another tk writing?")]
    Timeout { path: PathBuf, waited: Duration },
}

impl FileLock {
    /// Lock `dir`, retrying until `timeout` has passed.
    pub fn acquire(dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        let path = dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|source| LockError::CreateError {
                path: path.clone(),
                source,
            })?;

        let deadline = Instant::now() + timeout;
        while !try_lock_exclusive(&file) {
            if Instant::now() >= deadline {
                log::warn!("gave up waiting for {}", path.display());
                return Err(LockError::Timeout {
                    path,
                    waited: timeout,
                });
            }
            thread::sleep(RETRY_INTERVAL);
        }
        Ok(FileLock { _file: file })
    }

    pub fn acquire_default(dir: &Path) -> Result<Self, LockError> {
        Self::acquire(dir, DEFAULT_LOCK_TIMEOUT)
    }
}

/// Non-blocking exclusive flock. Closing the file releases it.
#[cfg(unix)]
fn try_lock_exclusive(file: &File) -> bool {
    use std::os::unix::io::AsRawFd;
    // SAFETY: the descriptor belongs to `file`, which outlives this call.
    unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) == 0 }
}

#[cfg(not(unix))]
fn try_lock_exclusive(_file: &File) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn relock_after_drop() {
        let tmp = TempDir::new().unwrap();
        let first = FileLock::acquire_default(tmp.path()).unwrap();
        drop(first);
        assert!(FileLock::acquire(tmp.path(), Duration::ZERO).is_ok());
        // the file stays behind for the next writer
        assert!(tmp.path().join(LOCK_FILE).exists());
    }

    #[cfg(unix)]
    #[test]
    fn contender_times_out_while_held() {
        let tmp = TempDir::new().unwrap();
        let _held = FileLock::acquire_default(tmp.path()).unwrap();
        let contender = FileLock::acquire(tmp.path(), Duration::from_millis(50));
        assert!(matches!(contender, Err(LockError::Timeout { .. })));
    }

    #[test]
    fn missing_directory_is_a_create_error() {
        let tmp = TempDir::new().unwrap();
        let result = FileLock::acquire_default(&tmp.path().join("nope"));
        assert!(matches!(result, Err(LockError::CreateError { .. })));
    }
}
