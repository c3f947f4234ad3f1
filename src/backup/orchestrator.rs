use std::fs;
use std::path::PathBuf;

use chrono::Local;

use super::{
    fsops, AofArchiver, BackupConfig, RunLock, RunLog, SnapshotCollector, AOF_ARCHIVE, DUMP_FILE,
    TIMESTAMP_FORMAT,
};
use crate::exec::CommandRunner;
use crate::proc::ProcessInspector;
use crate::{DbaError, Result};

/// Wall-clock banner format, microsecond resolution.
const BANNER_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// What a finished run produced and where.
#[derive(Debug)]
pub struct BackupReport {
    pub timestamp: String,
    pub run_dir: PathBuf,
    pub log_file: PathBuf,
    pub snapshot: Option<PathBuf>,
    pub appendlog: Option<PathBuf>,
}

/// Runs the full backup sequence and reports the artifacts.
///
/// Both concurrency guards run before anything is created on disk: the
/// process-table scan reproduces the operator-visible precondition, the
/// flock makes the exclusion atomic for the whole run.
pub fn run_backup(config: &BackupConfig, runner: &dyn CommandRunner) -> Result<BackupReport> {
    let mut inspector = ProcessInspector::new();
    let running = inspector.count_matching(&config.process_name, 1, "--backup")?;
    if running > 1 {
        return Err(DbaError::BackupInProgress(format!(
            "{running} processes match {} --backup",
            config.process_name
        )));
    }

    fs::create_dir_all(&config.backup_dir).map_err(DbaError::fs("create", &config.backup_dir))?;
    let lock_path = config.lock_path();
    let _lock = RunLock::acquire(&lock_path)?;

    let started = Local::now();
    let timestamp = started.format(TIMESTAMP_FORMAT).to_string();
    let run_dir = config.backup_dir.join(&timestamp);
    fs::create_dir_all(&run_dir).map_err(DbaError::fs("create", &run_dir))?;

    tracing::debug!(run_dir = %run_dir.display(), "backup run directory ready");

    let mut log = RunLog::create(&run_dir)?;
    log.line(&format!(
        "The backup process was started at date: {}",
        started.format(BANNER_FORMAT)
    ))?;

    // A rerun within the same second reuses the directory, so stale
    // artifacts go first.
    log.line("Removing old local backup")?;
    fsops::remove_if_present(&run_dir.join(DUMP_FILE))?;
    fsops::remove_if_present(&run_dir.join(AOF_ARCHIVE))?;

    let snapshot = SnapshotCollector::new(config, runner).collect(&run_dir, &mut log)?;
    let appendlog = AofArchiver::new(config, runner).archive(&run_dir, &mut log)?;

    log.line(&format!(
        "The backup process was finished at date: {}",
        Local::now().format(BANNER_FORMAT)
    ))?;
    log.line(&format!("{timestamp} completed OK!"))?;

    Ok(BackupReport {
        timestamp,
        run_dir,
        log_file: log.path().to_path_buf(),
        snapshot,
        appendlog,
    })
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod orchestrator_tests;
