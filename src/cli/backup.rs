use crate::backup::{run_backup, BackupConfig, BackupReport};
use crate::exec::CommandRunner;
use crate::format::Style;
use anyhow::Result;
use byte_unit::{Byte, UnitType};
use std::fs;
use std::path::{Path, PathBuf};

pub fn execute(backup_dir: PathBuf, style: &Style, runner: &dyn CommandRunner) -> Result<()> {
    tracing::info!("Backing up Redis server to: {}", backup_dir.display());

    let config = BackupConfig::new(backup_dir);

    println!("Backing up Redis server...");
    println!("  Backup directory: {}", config.backup_dir.display());

    let report = run_backup(&config, runner)?;
    print_summary(&report, style);

    Ok(())
}

fn print_summary(report: &BackupReport, style: &Style) {
    match &report.snapshot {
        Some(path) => println!("  ✓ Snapshot saved ({})", file_size(path)),
        None => println!(
            "  {}",
            style.yellow("Snapshot skipped: the server was not in a safe state")
        ),
    }

    match &report.appendlog {
        Some(path) => println!("  ✓ Append-only file archived ({})", file_size(path)),
        None => println!("  {}", style.yellow("The appendonly file is missing.")),
    }

    println!("\n✓ Backup completed successfully");
    println!("  Location: {}", report.run_dir.display());
    println!("  Run log:  {}", report.log_file.display());
}

/// Human-readable artifact size for the summary.
fn file_size(path: &Path) -> String {
    let bytes = fs::metadata(path).map(|meta| meta.len()).unwrap_or(0);
    let adjusted = Byte::from_u64(bytes).get_appropriate_unit(UnitType::Binary);
    format!("{adjusted:.2}")
}
