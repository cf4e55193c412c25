use std::cell::RefCell;

use super::{Invocation, ProcessOutput, ProcessRunner};
use crate::error::Result;

type Responder = Box<dyn Fn(&Invocation, usize) -> Result<ProcessOutput>>;

/// Records every invocation and answers from a closure given the call index.
pub struct ScriptedRunner {
    calls: RefCell<Vec<Invocation>>,
    respond: Responder,
}

impl ScriptedRunner {
    pub fn new(respond: impl Fn(&Invocation, usize) -> Result<ProcessOutput> + 'static) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            respond: Box::new(respond),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(|_, _| Ok(exited(0)))
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        let index = self.calls.borrow().len();
        self.calls.borrow_mut().push(invocation.clone());
        (self.respond)(invocation, index)
    }
}

pub fn exited(code: i32) -> ProcessOutput {
    ProcessOutput {
        exit_code: Some(code),
        ..ProcessOutput::default()
    }
}

pub fn printed(stdout: &str) -> ProcessOutput {
    ProcessOutput {
        exit_code: Some(0),
        stdout: stdout.to_string(),
        ..ProcessOutput::default()
    }
}
