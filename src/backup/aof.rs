use std::fs::File;
use std::path::{Path, PathBuf};

use super::{fsops, BackupConfig, RunLog, AOF_ARCHIVE};
use crate::exec::CommandRunner;
use crate::redis::RedisCli;
use crate::Result;

/// Rotates and compresses the append-only file into the run directory.
pub struct AofArchiver<'a> {
    redis: RedisCli<'a>,
    config: &'a BackupConfig,
}

impl<'a> AofArchiver<'a> {
    pub fn new(config: &'a BackupConfig, runner: &'a dyn CommandRunner) -> Self {
        Self {
            redis: RedisCli::new(runner),
            config,
        }
    }

    /// Archives the append-only file as `appendonly.aof.gz` inside the
    /// run directory.
    ///
    /// When both rewrite thresholds are set the server compacts the file
    /// on its own and the live copy is left untouched. When either
    /// threshold is zero, rotation is this tool's job: the live file is
    /// truncated right after the staging copy. Truncating a
    /// self-compacted file would lose commands; never truncating an
    /// unmanaged one would grow it without bound.
    pub fn archive(&self, run_dir: &Path, log: &mut RunLog) -> Result<Option<PathBuf>> {
        let live = self.config.aof_path();

        // A file that cannot be opened for reading is skipped, not failed.
        if File::open(&live).is_err() {
            tracing::warn!(
                path = %live.display(),
                "appendonly file missing or unreadable, skipping archive"
            );
            log.line("The appendonly file is missing")?;
            return Ok(None);
        }

        let rewrite = self.redis.aof_rewrite_config()?;
        tracing::debug!(
            rewrite_percentage = rewrite.rewrite_percentage,
            rewrite_min_size = rewrite.rewrite_min_size,
            "aof rewrite thresholds"
        );

        let arch = staged(&live, ".arch");
        let gz = staged(&live, ".gz");

        fsops::copy_idle(&live, &arch)?;
        tracing::debug!(path = %arch.display(), "staging copy written");

        if !rewrite.self_managed() {
            fsops::truncate(&live)?;
            tracing::debug!(path = %live.display(), "live appendonly file rotated");
        }

        fsops::gzip_max(&arch, &gz)?;
        fsops::remove_if_present(&arch)?;
        tracing::debug!(path = %gz.display(), "compressed archive written");

        let dest = run_dir.join(AOF_ARCHIVE);
        fsops::copy_idle(&gz, &dest)?;
        fsops::remove_if_present(&gz)?;
        log.line("Copying appendonly.aof.gz to backup-dir finished")?;

        Ok(Some(dest))
    }
}

/// Appends a staging suffix to a file name, `appendonly.aof` becomes
/// `appendonly.aof.arch` and so on.
fn staged(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
#[path = "aof_tests.rs"]
mod aof_tests;
