use std::path::{Path, PathBuf};

use super::{fsops, BackupConfig, RunLog, DUMP_FILE};
use crate::exec::CommandRunner;
use crate::redis::RedisCli;
use crate::Result;

/// Triggers a background save and collects the resulting `dump.rdb`
/// into the run directory.
pub struct SnapshotCollector<'a> {
    redis: RedisCli<'a>,
    config: &'a BackupConfig,
}

impl<'a> SnapshotCollector<'a> {
    pub fn new(config: &'a BackupConfig, runner: &'a dyn CommandRunner) -> Self {
        Self {
            redis: RedisCli::new(runner),
            config,
        }
    }

    /// Collects a snapshot unless the server reports an unsafe moment,
    /// a save already in flight or a failed last save. A skip is not an
    /// error; it is recorded in the run log and surfaced as `None`.
    pub fn collect(&self, run_dir: &Path, log: &mut RunLog) -> Result<Option<PathBuf>> {
        let status = self.redis.persistence_status()?;

        if !status.save_safe() {
            tracing::warn!(
                bgsave_in_progress = %status.bgsave_in_progress,
                last_bgsave_status = %status.last_bgsave_status,
                "skipping bgsave, server reports an unsafe save state"
            );
            log.line(&format!(
                "Bgsave skipped: rdb_bgsave_in_progress={}, rdb_last_bgsave_status={}",
                status.bgsave_in_progress, status.last_bgsave_status
            ))?;
            return Ok(None);
        }

        self.redis.bgsave()?;
        log.line("Bgsave finished")?;

        let dest = run_dir.join(DUMP_FILE);
        fsops::copy_idle(&self.config.dump_path(), &dest)?;
        log.line("Copying dump.rdb to backup-dir finished")?;

        Ok(Some(dest))
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod snapshot_tests;
