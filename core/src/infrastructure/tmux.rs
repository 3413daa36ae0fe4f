//! Tmux command builder and the production execution backend.
//!
//! Builders produce tmux CLI strings without executing them; `TmuxBackend`
//! feeds them through a [`CommandRunner`]. The session marker (`$TMUX`) is
//! captured at construction so tests can inject it explicitly.

use crate::errors::ExecError;
use crate::template::SessionSource;

use super::runner::CommandRunner;
use super::ExecBackend;

// ---------------------------------------------------------------------------
// Command builders
// ---------------------------------------------------------------------------

/// `tmux send-keys -t <window> <command> Enter`
pub fn send_keys(window: &str, command: &str) -> String {
    format!(
        "tmux send-keys -t {} {} Enter",
        shell_escape(window),
        shell_escape(command)
    )
}

/// `tmux display-message -p '#S'` — prints the active session name.
pub fn display_session() -> String {
    "tmux display-message -p '#S'".to_string()
}

/// Escape a string for safe use in a shell command.
///
/// Plain words pass through bare; anything else is wrapped in single quotes
/// with embedded quotes escaped via the `'\''` idiom.
pub fn shell_escape(s: &str) -> String {
    if s.is_empty() {
        return "''".to_string();
    }
    if s.chars().all(|c| {
        c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '%' | ':' | '{' | '}')
    }) {
        return s.to_string();
    }
    format!("'{}'", s.replace('\'', "'\\''"))
}

// ---------------------------------------------------------------------------
// TmuxBackend
// ---------------------------------------------------------------------------

/// Production backend: tmux sends plus detached shell spawns, both routed
/// through a [`CommandRunner`].
pub struct TmuxBackend<R: CommandRunner> {
    runner: R,
    /// Value of `$TMUX` at construction. `None` means no active session.
    session_marker: Option<String>,
}

impl<R: CommandRunner> TmuxBackend<R> {
    /// Detect the session marker from the process environment.
    pub fn new(runner: R) -> TmuxBackend<R> {
        let session_marker = std::env::var("TMUX").ok().filter(|v| !v.is_empty());
        TmuxBackend {
            runner,
            session_marker,
        }
    }

    /// Construct with an explicit session marker. Used by tests.
    pub fn with_session_marker(runner: R, session_marker: Option<String>) -> TmuxBackend<R> {
        TmuxBackend {
            runner,
            session_marker,
        }
    }
}

impl<R: CommandRunner> SessionSource for TmuxBackend<R> {
    fn session_name(&self) -> String {
        if self.session_marker.is_none() {
            return String::new();
        }
        match self.runner.run(&display_session()) {
            Ok(out) => out.trim().to_string(),
            Err(_) => String::new(),
        }
    }
}

impl<R: CommandRunner> ExecBackend for TmuxBackend<R> {
    fn send_to_pane(&self, window: &str, command: &str) -> Result<(), ExecError> {
        if self.session_marker.is_none() {
            return Err(ExecError::NoSession);
        }
        self.runner
            .run(&send_keys(window, command))
            .map(|_| ())
            .map_err(ExecError::SendFailed)
    }

    fn spawn_detached(&self, command: &str) -> Result<(), ExecError> {
        self.runner.spawn(command).map_err(ExecError::SpawnFailed)
    }
}
