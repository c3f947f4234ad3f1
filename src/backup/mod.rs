//! Backup pipeline: preflight checks, RDB snapshot collection, AOF
//! archiving, and the run log written alongside the artifacts.

pub mod aof;
pub mod config;
pub mod fsops;
pub mod lock;
pub mod orchestrator;
pub mod runlog;
pub mod snapshot;

pub use aof::AofArchiver;
pub use config::BackupConfig;
pub use lock::RunLock;
pub use orchestrator::{run_backup, BackupReport};
pub use runlog::RunLog;
pub use snapshot::SnapshotCollector;

/// Point-in-time dump written by BGSAVE into the data directory.
pub const DUMP_FILE: &str = "dump.rdb";

/// Live append-only file inside the data directory.
pub const AOF_FILE: &str = "appendonly.aof";

/// Compressed AOF artifact name inside a run directory.
pub const AOF_ARCHIVE: &str = "appendonly.aof.gz";

/// Per-run progress log, overwritten by every run.
pub const RUN_LOG_FILE: &str = "last_backup.log";

/// Advisory lock guarding the backup directory against concurrent runs.
pub const LOCK_FILE: &str = ".backup.lock";

/// Run directory naming, second resolution.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
