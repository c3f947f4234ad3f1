// Command execution - argument-vector invocation of external programs
pub mod runner;

pub use runner::{CommandRunner, SystemRunner};
