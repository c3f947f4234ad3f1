//! Administration helper for a Redis server: binary backups of the RDB
//! snapshot and append-only file into timestamped directories, plus a
//! convenience entry into the redis-cli shell.

pub mod backup;
pub mod cli;
pub mod error;
pub mod exec;
pub mod format;
pub mod proc;
pub mod redis;

pub use error::{DbaError, Result};
