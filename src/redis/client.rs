use crate::exec::CommandRunner;
use crate::{DbaError, Result};

/// Name of the administrative client binary.
const REDIS_CLI: &str = "redis-cli";

/// Snapshot of the server's persistence state, read once per backup run.
#[derive(Debug, Clone)]
pub struct PersistenceStatus {
    pub bgsave_in_progress: String,
    pub last_bgsave_status: String,
}

impl PersistenceStatus {
    /// A new background save may be triggered only when none is running and
    /// the previous one did not fail.
    pub fn save_safe(&self) -> bool {
        self.bgsave_in_progress == "0" && self.last_bgsave_status == "ok"
    }

    /// Parse the `INFO persistence` reply: CRLF-terminated `key:value`
    /// lines, `#` section headers skipped.
    pub fn parse(info: &str) -> Result<Self> {
        let mut bgsave_in_progress = None;
        let mut last_bgsave_status = None;

        for line in info.lines() {
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once(':') {
                match key {
                    "rdb_bgsave_in_progress" => bgsave_in_progress = Some(value.to_string()),
                    "rdb_last_bgsave_status" => last_bgsave_status = Some(value.to_string()),
                    _ => {}
                }
            }
        }

        match (bgsave_in_progress, last_bgsave_status) {
            (Some(bgsave_in_progress), Some(last_bgsave_status)) => Ok(Self {
                bgsave_in_progress,
                last_bgsave_status,
            }),
            (None, _) => Err(unexpected_reply(
                "info persistence",
                "missing rdb_bgsave_in_progress field",
            )),
            (_, None) => Err(unexpected_reply(
                "info persistence",
                "missing rdb_last_bgsave_status field",
            )),
        }
    }
}

/// The server's append-only-file auto-rewrite thresholds.
#[derive(Debug, Clone, Copy)]
pub struct AofRewriteConfig {
    pub rewrite_percentage: u64,
    pub rewrite_min_size: u64,
}

impl AofRewriteConfig {
    /// Both thresholds non-zero means the server compacts its own log; the
    /// archiver must then copy without truncating.
    pub fn self_managed(&self) -> bool {
        self.rewrite_percentage > 0 && self.rewrite_min_size > 0
    }
}

/// Thin wrapper over the redis-cli binary. Every call is a fresh synchronous
/// invocation through the command runner.
pub struct RedisCli<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> RedisCli<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    pub fn persistence_status(&self) -> Result<PersistenceStatus> {
        let reply = self.runner.run(REDIS_CLI, &["info", "persistence"])?;
        let status = PersistenceStatus::parse(&reply)?;

        tracing::debug!(
            bgsave_in_progress = %status.bgsave_in_progress,
            last_bgsave_status = %status.last_bgsave_status,
            "read persistence status"
        );
        Ok(status)
    }

    pub fn aof_rewrite_config(&self) -> Result<AofRewriteConfig> {
        let config = AofRewriteConfig {
            rewrite_percentage: self.config_get_u64("auto-aof-rewrite-percentage")?,
            rewrite_min_size: self.config_get_u64("auto-aof-rewrite-min-size")?,
        };

        tracing::debug!(
            rewrite_percentage = config.rewrite_percentage,
            rewrite_min_size = config.rewrite_min_size,
            "read aof rewrite config"
        );
        Ok(config)
    }

    /// Ask the server to start a background save. The server's acknowledgment
    /// text is not inspected beyond logging; completion is not awaited.
    pub fn bgsave(&self) -> Result<()> {
        let reply = self.runner.run(REDIS_CLI, &["bgsave"])?;
        tracing::debug!(reply = %reply.trim_end(), "bgsave requested");
        Ok(())
    }

    /// Hand the terminal over to an interactive redis-cli session.
    pub fn interactive_shell(&self) -> Result<()> {
        self.runner.run_interactive(REDIS_CLI, &[])
    }

    /// `CONFIG GET` replies with two lines: the parameter name, then its
    /// value.
    fn config_get_u64(&self, key: &str) -> Result<u64> {
        let command = format!("config get {key}");
        let reply = self.runner.run(REDIS_CLI, &["config", "get", key])?;

        let value = reply
            .lines()
            .nth(1)
            .map(str::trim_end)
            .ok_or_else(|| unexpected_reply(&command, "missing value line"))?;

        value.parse::<u64>().map_err(|_| {
            unexpected_reply(&command, &format!("value '{value}' is not an integer"))
        })
    }
}

fn unexpected_reply(command: &str, detail: &str) -> DbaError {
    DbaError::UnexpectedReply {
        command: command.to_string(),
        detail: detail.to_string(),
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
