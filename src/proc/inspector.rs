use crate::{DbaError, Result};
use std::ffi::{OsStr, OsString};
use sysinfo::{ProcessesToUpdate, System};

/// Scans the host process table to detect concurrently running instances of
/// this tool before a backup mutates anything.
pub struct ProcessInspector {
    system: System,
}

impl ProcessInspector {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }

    /// Count running processes whose name equals `name` and whose
    /// command-line argument at `arg_index` equals `arg_value`.
    ///
    /// The table is refreshed on every call. An empty table is treated as a
    /// failed scan rather than zero matches: at minimum the current process
    /// must be visible for the count to mean anything.
    pub fn count_matching(
        &mut self,
        name: &str,
        arg_index: usize,
        arg_value: &str,
    ) -> Result<usize> {
        self.system.refresh_processes(ProcessesToUpdate::All, true);

        if self.system.processes().is_empty() {
            return Err(DbaError::ProcessTable(
                "no processes visible; cannot verify exclusive run".to_string(),
            ));
        }

        let count = self
            .system
            .processes()
            .values()
            .filter(|process| process.name() == OsStr::new(name))
            .inspect(|process| {
                tracing::debug!(pid = %process.pid(), cmdline = ?process.cmd(), "running process")
            })
            .filter(|process| cmdline_matches(process.cmd(), arg_index, arg_value))
            .count();

        Ok(count)
    }
}

impl Default for ProcessInspector {
    fn default() -> Self {
        Self::new()
    }
}

fn cmdline_matches(cmd: &[OsString], arg_index: usize, arg_value: &str) -> bool {
    cmd.get(arg_index)
        .map(|arg| arg.as_os_str() == OsStr::new(arg_value))
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "inspector_tests.rs"]
mod inspector_tests;
