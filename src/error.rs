use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbaError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to launch '{program}': {source}")]
    Spawn { program: String, source: io::Error },

    #[error("Command '{command}' failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Unexpected reply from '{command}': {detail}")]
    UnexpectedReply { command: String, detail: String },

    #[error("Failed to {op} {}: {source}", path.display())]
    Fs {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    #[error("The backup process is already running ({0})")]
    BackupInProgress(String),

    #[error("Process table scan failed: {0}")]
    ProcessTable(String),
}

impl DbaError {
    /// Context closure for filesystem calls, used with `map_err`.
    pub(crate) fn fs(op: &'static str, path: &Path) -> impl FnOnce(io::Error) -> Self {
        let path = path.to_path_buf();
        move |source| Self::Fs { op, path, source }
    }
}

pub type Result<T> = std::result::Result<T, DbaError>;
