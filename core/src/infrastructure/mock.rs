//! Recording backend for dispatcher and engine tests.

use std::cell::RefCell;

use crate::errors::ExecError;
use crate::template::SessionSource;

use super::ExecBackend;

/// One recorded backend invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// `(window, command)` sent to the multiplexer.
    Send(String, String),
    /// Command spawned detached.
    Spawn(String),
}

/// Test-double backend: records every invocation and fails on demand.
pub struct MockBackend {
    session: String,
    invocations: RefCell<Vec<Invocation>>,
    /// When set, the invocation at this position (0-based) fails.
    fail_at: Option<(usize, ExecError)>,
}

impl MockBackend {
    pub fn new() -> MockBackend {
        MockBackend {
            session: "main".into(),
            invocations: RefCell::new(Vec::new()),
            fail_at: None,
        }
    }

    pub fn with_session(mut self, name: &str) -> MockBackend {
        self.session = name.into();
        self
    }

    /// Fail the `index`-th invocation (counting sends and spawns together).
    pub fn failing_at(mut self, index: usize, error: ExecError) -> MockBackend {
        self.fail_at = Some((index, error));
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    fn record(&self, invocation: Invocation) -> Result<(), ExecError> {
        let position = self.invocations.borrow().len();
        self.invocations.borrow_mut().push(invocation);
        match &self.fail_at {
            Some((index, error)) if *index == position => Err(error.clone()),
            _ => Ok(()),
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionSource for MockBackend {
    fn session_name(&self) -> String {
        self.session.clone()
    }
}

impl ExecBackend for MockBackend {
    fn send_to_pane(&self, window: &str, command: &str) -> Result<(), ExecError> {
        self.record(Invocation::Send(window.into(), command.into()))
    }

    fn spawn_detached(&self, command: &str) -> Result<(), ExecError> {
        self.record(Invocation::Spawn(command.into()))
    }
}
