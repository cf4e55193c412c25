pub mod allowlist;
pub mod classifier;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod process;
pub mod router;

pub use error::{BatchError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_JOB_FAILURES: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
