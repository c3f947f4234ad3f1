use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{DbaError, Result};

/// Plain-text progress log written next to the run's artifacts.
pub struct RunLog {
    file: File,
    path: PathBuf,
}

impl RunLog {
    /// Creates `last_backup.log` inside `run_dir`, truncating any
    /// leftover from a run that landed in the same directory.
    pub fn create(run_dir: &Path) -> Result<Self> {
        let path = run_dir.join(super::RUN_LOG_FILE);
        let file = File::create(&path).map_err(DbaError::fs("create", &path))?;
        Ok(Self { file, path })
    }

    /// Appends one line. Lines also reach the debug log so `--debug`
    /// shows run progress without opening the file.
    pub fn line(&mut self, text: &str) -> Result<()> {
        tracing::debug!(line = text, "run log");
        writeln!(self.file, "{text}").map_err(DbaError::fs("write", &self.path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
