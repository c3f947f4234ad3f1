use std::path::PathBuf;

/// Default location of the Redis persistence files on a stock install.
pub const DEFAULT_DATA_DIR: &str = "/var/lib/redis";

/// Settings for a single backup run.
#[derive(Debug, Clone)]
pub struct BackupConfig {
    /// Directory that receives timestamped run directories.
    pub backup_dir: PathBuf,
    /// Directory holding the live `dump.rdb` and `appendonly.aof`.
    pub data_dir: PathBuf,
    /// Process name used for the exclusive-run scan.
    pub process_name: String,
}

impl BackupConfig {
    pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            backup_dir: backup_dir.into(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            process_name: env!("CARGO_PKG_NAME").to_string(),
        }
    }

    /// Overrides the data directory, mainly useful outside a stock install.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn dump_path(&self) -> PathBuf {
        self.data_dir.join(super::DUMP_FILE)
    }

    pub fn aof_path(&self) -> PathBuf {
        self.data_dir.join(super::AOF_FILE)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.backup_dir.join(super::LOCK_FILE)
    }
}
