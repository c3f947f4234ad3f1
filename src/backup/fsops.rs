use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::{DbaError, Result};

/// Copies `src` to `dst` at idle I/O priority so a large artifact does
/// not starve the server's own disk traffic. Permission bits carry over.
pub fn copy_idle(src: &Path, dst: &Path) -> Result<u64> {
    let _priority = IdleIoPriority::engage();
    fs::copy(src, dst).map_err(DbaError::fs("copy", src))
}

/// Compresses `src` into `dst` at the strongest gzip setting. Returns
/// the uncompressed byte count.
pub fn gzip_max(src: &Path, dst: &Path) -> Result<u64> {
    let mut input = File::open(src).map_err(DbaError::fs("open", src))?;
    let output = File::create(dst).map_err(DbaError::fs("create", dst))?;

    let mut encoder = GzEncoder::new(output, Compression::best());
    let bytes = io::copy(&mut input, &mut encoder).map_err(DbaError::fs("compress", src))?;
    encoder.finish().map_err(DbaError::fs("flush", dst))?;

    Ok(bytes)
}

/// Empties a file in place, keeping the inode the server has open.
pub fn truncate(path: &Path) -> Result<()> {
    OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(DbaError::fs("truncate", path))?;

    Ok(())
}

/// Removes a file; absence is not an error.
pub fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(DbaError::Fs {
            op: "remove",
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Puts the calling thread in the idle I/O scheduling class until drop.
///
/// The priority is advisory. A kernel that rejects the syscall leaves
/// the copy at normal priority, with a debug note.
#[cfg(target_os = "linux")]
struct IdleIoPriority {
    previous: Option<libc::c_long>,
}

#[cfg(target_os = "linux")]
impl IdleIoPriority {
    const WHO_PROCESS: libc::c_int = 1;
    const CLASS_IDLE: libc::c_long = 3;
    const CLASS_SHIFT: u32 = 13;

    fn engage() -> Self {
        let previous = unsafe { libc::syscall(libc::SYS_ioprio_get, Self::WHO_PROCESS, 0_i32) };
        if previous < 0 {
            tracing::debug!("ioprio_get rejected, copying at normal priority");
            return Self { previous: None };
        }

        let idle = Self::CLASS_IDLE << Self::CLASS_SHIFT;
        let rc = unsafe { libc::syscall(libc::SYS_ioprio_set, Self::WHO_PROCESS, 0_i32, idle) };
        if rc < 0 {
            tracing::debug!("ioprio_set rejected, copying at normal priority");
            return Self { previous: None };
        }

        Self {
            previous: Some(previous),
        }
    }
}

#[cfg(target_os = "linux")]
impl Drop for IdleIoPriority {
    fn drop(&mut self) {
        if let Some(previous) = self.previous {
            let _ =
                unsafe { libc::syscall(libc::SYS_ioprio_set, Self::WHO_PROCESS, 0_i32, previous) };
        }
    }
}

#[cfg(not(target_os = "linux"))]
struct IdleIoPriority;

#[cfg(not(target_os = "linux"))]
impl IdleIoPriority {
    fn engage() -> Self {
        Self
    }
}

#[cfg(test)]
#[path = "fsops_tests.rs"]
mod fsops_tests;
