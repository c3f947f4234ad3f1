use super::{AofRewriteConfig, PersistenceStatus, RedisCli};
use crate::exec::CommandRunner;
use crate::{DbaError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// Replies keyed by the full command line; records every invocation.
struct FakeRunner {
    replies: HashMap<String, String>,
    calls: RefCell<Vec<String>>,
}

impl FakeRunner {
    fn new(replies: &[(&str, &str)]) -> Self {
        Self {
            replies: replies
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        let key = format!("{} {}", program, args.join(" "));
        self.calls.borrow_mut().push(key.clone());
        match self.replies.get(&key) {
            Some(reply) => Ok(reply.clone()),
            None => panic!("unexpected command: {key}"),
        }
    }

    fn run_interactive(&self, program: &str, _args: &[&str]) -> Result<()> {
        self.calls.borrow_mut().push(format!("interactive {program}"));
        Ok(())
    }
}

const INFO_SAFE: &str = "# Persistence\r\n\
loading:0\r\n\
async_loading:0\r\n\
rdb_changes_since_last_save:42\r\n\
rdb_bgsave_in_progress:0\r\n\
rdb_last_save_time:1700000000\r\n\
rdb_last_bgsave_status:ok\r\n\
rdb_last_bgsave_time_sec:1\r\n\
aof_enabled:1\r\n\
aof_rewrite_in_progress:0\r\n";

#[test]
fn test_persistence_status_parses_crlf_info_reply() {
    let runner = FakeRunner::new(&[("redis-cli info persistence", INFO_SAFE)]);
    let redis = RedisCli::new(&runner);

    let status = redis.persistence_status().unwrap();
    assert_eq!(status.bgsave_in_progress, "0");
    assert_eq!(status.last_bgsave_status, "ok");
    assert!(status.save_safe());
}

#[test]
fn test_save_unsafe_when_bgsave_running_or_failed() {
    let running = PersistenceStatus {
        bgsave_in_progress: "1".to_string(),
        last_bgsave_status: "ok".to_string(),
    };
    assert!(!running.save_safe());

    let failed = PersistenceStatus {
        bgsave_in_progress: "0".to_string(),
        last_bgsave_status: "err".to_string(),
    };
    assert!(!failed.save_safe());
}

#[test]
fn test_persistence_status_missing_field_is_rejected() {
    let err = PersistenceStatus::parse("# Persistence\r\nloading:0\r\n").unwrap_err();

    match err {
        DbaError::UnexpectedReply { command, detail } => {
            assert_eq!(command, "info persistence");
            assert!(detail.contains("rdb_bgsave_in_progress"));
        }
        other => panic!("expected UnexpectedReply, got: {other:?}"),
    }
}

#[test]
fn test_aof_rewrite_config_parses_name_and_value_lines() {
    let runner = FakeRunner::new(&[
        (
            "redis-cli config get auto-aof-rewrite-percentage",
            "auto-aof-rewrite-percentage\n100\n",
        ),
        (
            "redis-cli config get auto-aof-rewrite-min-size",
            "auto-aof-rewrite-min-size\n67108864\n",
        ),
    ]);
    let redis = RedisCli::new(&runner);

    let config = redis.aof_rewrite_config().unwrap();
    assert_eq!(config.rewrite_percentage, 100);
    assert_eq!(config.rewrite_min_size, 67_108_864);
    assert!(config.self_managed());
}

#[test]
fn test_zero_threshold_disables_self_management() {
    let config = AofRewriteConfig {
        rewrite_percentage: 0,
        rewrite_min_size: 67_108_864,
    };
    assert!(!config.self_managed());

    let config = AofRewriteConfig {
        rewrite_percentage: 100,
        rewrite_min_size: 0,
    };
    assert!(!config.self_managed());
}

#[test]
fn test_config_get_rejects_non_integer_value() {
    let runner = FakeRunner::new(&[
        (
            "redis-cli config get auto-aof-rewrite-percentage",
            "auto-aof-rewrite-percentage\nyes\n",
        ),
    ]);
    let redis = RedisCli::new(&runner);

    let err = redis.aof_rewrite_config().unwrap_err();
    match err {
        DbaError::UnexpectedReply { detail, .. } => {
            assert!(detail.contains("yes"));
        }
        other => panic!("expected UnexpectedReply, got: {other:?}"),
    }
}

#[test]
fn test_config_get_rejects_truncated_reply() {
    let runner = FakeRunner::new(&[
        (
            "redis-cli config get auto-aof-rewrite-percentage",
            "auto-aof-rewrite-percentage\n",
        ),
    ]);
    let redis = RedisCli::new(&runner);

    let err = redis.aof_rewrite_config().unwrap_err();
    assert!(matches!(err, DbaError::UnexpectedReply { .. }));
}

#[test]
fn test_bgsave_issues_single_command() {
    let runner = FakeRunner::new(&[("redis-cli bgsave", "Background saving started\n")]);
    let redis = RedisCli::new(&runner);

    redis.bgsave().unwrap();
    assert_eq!(runner.calls.borrow().as_slice(), ["redis-cli bgsave"]);
}
