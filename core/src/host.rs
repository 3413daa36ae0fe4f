//! Host collaborator capabilities.
//!
//! The interactive surface (prompts, pickers, notifications) and the editor
//! context (current file, working directory) are external collaborators. The
//! `Host` trait is the full capability set the engine consumes; the CLI crate
//! provides the production implementation and `MockHost` scripts it for tests.

use std::cell::RefCell;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// NotifyLevel
// ---------------------------------------------------------------------------

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}

impl NotifyLevel {
    /// Short label suitable for display.
    pub fn label(&self) -> &str {
        match self {
            NotifyLevel::Info => "info",
            NotifyLevel::Warn => "warn",
            NotifyLevel::Error => "error",
        }
    }
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// Capabilities provided by the hosting environment.
pub trait Host {
    /// The working directory the project state is keyed by.
    fn cwd(&self) -> PathBuf;

    /// Full path of the file currently in focus, if any.
    fn current_file(&self) -> Option<PathBuf>;

    /// Ask the user for a string. `None` means the prompt was cancelled.
    fn prompt(&self, message: &str) -> Option<String>;

    /// Ask the user to choose one of `options`. Returns the chosen index,
    /// or `None` if cancelled.
    fn select(&self, message: &str, options: &[String]) -> Option<usize>;

    /// Display a notification to the user.
    fn notify(&self, level: NotifyLevel, text: &str);
}

// ---------------------------------------------------------------------------
// MockHost (test double)
// ---------------------------------------------------------------------------

/// Scripted host for tests: prompt and select replies are pre-loaded and
/// consumed in order; notifications are recorded for assertion.
pub struct MockHost {
    cwd: PathBuf,
    file: Option<PathBuf>,
    prompts: RefCell<Vec<Option<String>>>,
    selections: RefCell<Vec<Option<usize>>>,
    prompt_count: RefCell<usize>,
    notifications: RefCell<Vec<(NotifyLevel, String)>>,
}

impl MockHost {
    pub fn new(cwd: &str) -> MockHost {
        MockHost {
            cwd: PathBuf::from(cwd),
            file: None,
            prompts: RefCell::new(Vec::new()),
            selections: RefCell::new(Vec::new()),
            prompt_count: RefCell::new(0),
            notifications: RefCell::new(Vec::new()),
        }
    }

    pub fn with_file(mut self, file: &str) -> MockHost {
        self.file = Some(PathBuf::from(file));
        self
    }

    /// Queue prompt replies, consumed front to back. `None` = cancelled.
    pub fn with_prompts(self, replies: Vec<Option<String>>) -> MockHost {
        let mut reversed = replies;
        reversed.reverse();
        *self.prompts.borrow_mut() = reversed;
        self
    }

    /// Queue select replies, consumed front to back. `None` = cancelled.
    pub fn with_selections(self, replies: Vec<Option<usize>>) -> MockHost {
        let mut reversed = replies;
        reversed.reverse();
        *self.selections.borrow_mut() = reversed;
        self
    }

    pub fn prompt_count(&self) -> usize {
        *self.prompt_count.borrow()
    }

    pub fn notifications(&self) -> Vec<(NotifyLevel, String)> {
        self.notifications.borrow().clone()
    }
}

impl Host for MockHost {
    fn cwd(&self) -> PathBuf {
        self.cwd.clone()
    }

    fn current_file(&self) -> Option<PathBuf> {
        self.file.clone()
    }

    fn prompt(&self, _message: &str) -> Option<String> {
        *self.prompt_count.borrow_mut() += 1;
        self.prompts.borrow_mut().pop().unwrap_or(None)
    }

    fn select(&self, _message: &str, options: &[String]) -> Option<usize> {
        match self.selections.borrow_mut().pop().unwrap_or(None) {
            Some(i) if i < options.len() => Some(i),
            _ => None,
        }
    }

    fn notify(&self, level: NotifyLevel, text: &str) {
        self.notifications.borrow_mut().push((level, text.to_string()));
    }
}
