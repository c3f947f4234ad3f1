use anyhow::Result;
use clap::{CommandFactory, Parser};
use redisdba::exec::SystemRunner;
use redisdba::format::Style;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "redisdba")]
#[command(about = "Administration helper for a Redis server", long_about = None)]
struct Cli {
    /// Perform backup
    #[arg(long, requires = "backup_dir")]
    backup: bool,

    /// The backup directory
    #[arg(long)]
    backup_dir: Option<PathBuf>,

    /// Set debug
    #[arg(long)]
    debug: bool,

    /// Enter to redis-cli
    #[arg(long)]
    enter: bool,

    #[arg(long, hide = true)]
    test: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    if cli.debug {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::ERROR)
            .init();
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", Style::auto().red(&format!("Error: {err:#}")));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let style = Style::auto();
    let runner = SystemRunner::new();

    if cli.test {
        redisdba::cli::selftest::execute();
    } else if cli.backup {
        // clap guarantees backup_dir is present when --backup is given.
        let backup_dir = cli.backup_dir.expect("--backup requires --backup_dir");
        redisdba::cli::backup::execute(backup_dir, &style, &runner)?;
    } else if cli.enter {
        redisdba::cli::shell::execute(&style, &runner)?;
    } else {
        // No action flag: show usage instead of silently doing nothing.
        Cli::command().print_help()?;
    }

    Ok(())
}
