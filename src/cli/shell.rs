use crate::exec::CommandRunner;
use crate::format::Style;
use crate::redis::RedisCli;
use anyhow::Result;

/// Opens an interactive `redis-cli` session and blocks until it ends.
pub fn execute(style: &Style, runner: &dyn CommandRunner) -> Result<()> {
    println!("{}", style.green("Enter to shell of Redis Server."));
    RedisCli::new(runner).interactive_shell()?;
    Ok(())
}
