//! Invocation of the external application.
//!
//! Everything the dispatcher knows about the external application passes
//! through [`ProcessRunner::run`]: a program, its arguments, an explicit
//! environment block, and a timeout go in; an exit code and captured output
//! come back.

mod log_tail;
#[cfg(test)]
pub(crate) mod mock;
mod system;

pub use log_tail::LogTail;
pub use system::{EXTERNAL_LOG_TARGET, SystemProcessRunner};

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{BatchError, Result};

/// A fully described process launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// Variables added on top of the inherited environment.
    pub env: BTreeMap<String, String>,
    pub timeout: Option<Duration>,
    /// Side-channel log file the child appends to.
    pub log_file: Option<PathBuf>,
}

impl Invocation {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            timeout: None,
            log_file: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// Value of an environment variable set on this invocation.
    #[must_use]
    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }

    /// Short program name for messages.
    #[must_use]
    pub fn program_name(&self) -> String {
        program_name(&self.program)
    }
}

pub(crate) fn program_name(program: &Path) -> String {
    program
        .file_name()
        .map_or_else(|| program.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// What a finished process left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

impl ProcessOutput {
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }

    /// Converts a non-zero exit into [`BatchError::ProcessExit`].
    ///
    /// # Errors
    /// Returns `ProcessExit` carrying the captured output when the exit code is not 0.
    pub fn into_result(self, program: &str) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(BatchError::ProcessExit {
                program: program.to_string(),
                code: self.exit_code,
                stdout: self.stdout,
                stderr: self.stderr,
            })
        }
    }
}

/// Runs an [`Invocation`] to completion.
pub trait ProcessRunner {
    /// Launches the process and blocks until it exits or times out.
    ///
    /// A non-zero exit is not an error at this level; it is reported through
    /// [`ProcessOutput::exit_code`].
    ///
    /// # Errors
    /// Returns `ProcessSpawn` if the program cannot be launched and
    /// `ProcessTimeout` if it outlives `invocation.timeout`.
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        (**self).run(invocation)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
