// Administrative client for the Redis server (wraps redis-cli)
pub mod client;

pub use client::{AofRewriteConfig, PersistenceStatus, RedisCli};
