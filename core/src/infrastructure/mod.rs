//! Execution backends for dispatch targets.
//!
//! Provides the `ExecBackend` trait and implementations for tmux plus the
//! detached shell (production) and a recording mock (testing). Command
//! strings are built separately from execution so the builders stay pure and
//! directly testable.

pub mod mock;
pub mod runner;
pub mod tmux;

use crate::errors::ExecError;
use crate::template::SessionSource;

/// A dispatch backend: the two execution targets plus the session-name
/// capability the template engine consumes.
pub trait ExecBackend: SessionSource {
    /// Send `command` as keystrokes (plus the activation keystroke) to the
    /// given tmux window. Fails with [`ExecError::NoSession`] when no
    /// session is active.
    fn send_to_pane(&self, window: &str, command: &str) -> Result<(), ExecError>;

    /// Spawn `command` detached through the shell, output discarded.
    fn spawn_detached(&self, command: &str) -> Result<(), ExecError>;
}
