// CLI module - one entry point per action flag
pub mod backup;
pub mod selftest;
pub mod shell;
