//! Shell command execution primitives.
//!
//! `CommandRunner` is the seam between command construction and the system:
//! a synchronous `run` returning success/failure plus output, and a
//! fire-and-forget `spawn` whose child is never awaited. `ShellRunner` is the
//! production implementation; `MockRunner` records calls and returns preset
//! responses for tests.

use std::cell::RefCell;
use std::process::{Command, Stdio};

/// Trait for executing shell command strings.
pub trait CommandRunner {
    /// Run `sh -c <cmd>` to completion. `Ok` carries stdout; `Err` carries
    /// a failure message for nonzero exit or spawn trouble.
    fn run(&self, cmd: &str) -> Result<String, String>;

    /// Launch `sh -c <cmd>` detached, with stdin/stdout/stderr discarded.
    /// Only spawn-level failure is reported; the child's exit code is never
    /// observed.
    fn spawn(&self, cmd: &str) -> Result<(), String>;
}

/// Production runner backed by `sh -c`.
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, cmd: &str) -> Result<String, String> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(cmd)
            .output()
            .map_err(|e| format!("failed to execute: {}", e))?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            Err(String::from_utf8_lossy(&output.stderr).to_string())
        }
    }

    fn spawn(&self, cmd: &str) -> Result<(), String> {
        Command::new("sh")
            .arg("-c")
            .arg(cmd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|e| format!("failed to spawn: {}", e))
    }
}

/// Test-double runner: records every call, replies from preset queues.
pub struct MockRunner {
    run_responses: RefCell<Vec<Result<String, String>>>,
    spawn_responses: RefCell<Vec<Result<(), String>>>,
    runs: RefCell<Vec<String>>,
    spawns: RefCell<Vec<String>>,
}

impl MockRunner {
    pub fn new() -> MockRunner {
        MockRunner {
            run_responses: RefCell::new(Vec::new()),
            spawn_responses: RefCell::new(Vec::new()),
            runs: RefCell::new(Vec::new()),
            spawns: RefCell::new(Vec::new()),
        }
    }

    /// Preset `run` responses, consumed front to back; exhausted → `Ok("")`.
    pub fn with_run_responses(responses: Vec<Result<String, String>>) -> MockRunner {
        let runner = MockRunner::new();
        let mut reversed = responses;
        reversed.reverse();
        *runner.run_responses.borrow_mut() = reversed;
        runner
    }

    /// Preset `spawn` responses, consumed front to back; exhausted → `Ok(())`.
    pub fn with_spawn_responses(self, responses: Vec<Result<(), String>>) -> MockRunner {
        let mut reversed = responses;
        reversed.reverse();
        *self.spawn_responses.borrow_mut() = reversed;
        self
    }

    pub fn executed_runs(&self) -> Vec<String> {
        self.runs.borrow().clone()
    }

    pub fn executed_spawns(&self) -> Vec<String> {
        self.spawns.borrow().clone()
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, cmd: &str) -> Result<String, String> {
        self.runs.borrow_mut().push(cmd.to_string());
        self.run_responses
            .borrow_mut()
            .pop()
            .unwrap_or(Ok(String::new()))
    }

    fn spawn(&self, cmd: &str) -> Result<(), String> {
        self.spawns.borrow_mut().push(cmd.to_string());
        self.spawn_responses.borrow_mut().pop().unwrap_or(Ok(()))
    }
}
