use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::{Invocation, LogTail, ProcessOutput, ProcessRunner};
use crate::error::{BatchError, Result};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Log target for lines relayed from the external application's log file.
pub const EXTERNAL_LOG_TARGET: &str = "ps_batch_runner::external";

/// Spawns real child processes.
#[derive(Debug, Clone)]
pub struct SystemProcessRunner {
    poll_interval: Duration,
}

impl Default for SystemProcessRunner {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl SystemProcessRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        let program = invocation.program_name();
        let mut tail = invocation.log_file.as_deref().map(LogTail::new);

        tracing::debug!(
            program = %invocation.program.display(),
            args = ?invocation.args,
            "spawning"
        );
        let start = Instant::now();
        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .envs(&invocation.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| BatchError::ProcessSpawn {
                program: program.clone(),
                source,
            })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = loop {
            relay(tail.as_mut(), false);

            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {}
                Err(e) => {
                    reap(&mut child);
                    return Err(BatchError::io(e, &invocation.program, "wait for"));
                }
            }

            if let Some(limit) = invocation.timeout
                && start.elapsed() >= limit
            {
                tracing::warn!(program = %program, timeout_secs = limit.as_secs(), "killing timed-out process");
                reap(&mut child);
                relay(tail.as_mut(), true);
                // Reader threads are left detached: a surviving grandchild may
                // still hold the pipes open.
                return Err(BatchError::ProcessTimeout {
                    program,
                    timeout: limit,
                });
            }

            thread::sleep(self.poll_interval);
        };

        relay(tail.as_mut(), true);

        Ok(ProcessOutput {
            exit_code: status.code(),
            stdout: collect(stdout),
            stderr: collect(stderr),
            duration: start.elapsed(),
        })
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .map(|buf| String::from_utf8_lossy(&buf).into_owned())
        .unwrap_or_default()
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn relay(tail: Option<&mut LogTail>, last: bool) {
    let Some(tail) = tail else {
        return;
    };
    let lines = if last { tail.finish() } else { tail.poll() };
    for line in lines {
        tracing::info!(target: EXTERNAL_LOG_TARGET, "{line}");
    }
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod tests;
