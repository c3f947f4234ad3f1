use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use nix::errno::Errno;
use nix::fcntl::{Flock, FlockArg};

use crate::{DbaError, Result};

/// Exclusive advisory lock on the backup directory, held for the whole
/// run and released on drop.
///
/// The lock file persists between runs; only the flock state matters.
/// It holds the PID of the current holder so an operator can see who
/// owns a contended lock.
#[derive(Debug)]
pub struct RunLock {
    _flock: Flock<File>,
    path: PathBuf,
}

impl RunLock {
    /// Takes the lock without blocking. `BackupInProgress` means another
    /// run currently owns the directory.
    pub fn acquire(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(path)
            .map_err(DbaError::fs("open", path))?;

        let mut flock = match Flock::lock(file, FlockArg::LockExclusiveNonblock) {
            Ok(flock) => flock,
            Err((_, Errno::EWOULDBLOCK)) => {
                return Err(DbaError::BackupInProgress(format!(
                    "lock held on {}",
                    path.display()
                )))
            }
            Err((_, errno)) => {
                return Err(DbaError::Fs {
                    op: "lock",
                    path: path.to_path_buf(),
                    source: std::io::Error::from_raw_os_error(errno as i32),
                })
            }
        };

        // Truncate only after the lock is ours, never the holder's PID.
        flock.set_len(0).map_err(DbaError::fs("truncate", path))?;
        writeln!(&mut *flock, "{}", process::id()).map_err(DbaError::fs("write", path))?;

        tracing::debug!(path = %path.display(), "run lock acquired");

        Ok(Self {
            _flock: flock,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod lock_tests;
