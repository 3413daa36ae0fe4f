//! Error types for the cmdslot core crate.
//!
//! The taxonomy is deliberately small: storage problems (`StoreError`),
//! contract violations on slot indices (`InvalidSlotError`), and executor
//! failures (`ExecError`, wrapped with the failing phase as `DispatchError`).
//! Cancelled prompts are not errors — they abort silently. Nothing here is
//! ever retried automatically.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::resolve::Phase;

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum StoreError {
    /// The persisted file could not be parsed. Recovered internally by
    /// falling back to a fresh empty state; never reaches callers of `load`.
    Decode(serde_json::Error),
    /// The in-memory state could not be serialized.
    Encode(serde_json::Error),
    /// The persisted file could not be written.
    Write { path: PathBuf, source: io::Error },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Decode(e) => write!(f, "cannot decode slot file: {}", e),
            StoreError::Encode(e) => write!(f, "cannot encode slot file: {}", e),
            StoreError::Write { path, source } => {
                write!(f, "cannot write '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Decode(e) | StoreError::Encode(e) => Some(e),
            StoreError::Write { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Slot index contract
// ---------------------------------------------------------------------------

/// A slot index outside 1..=9. A programming-contract violation: fatal to
/// the calling operation, not user-recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSlotError(pub u8);

impl fmt::Display for InvalidSlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot index out of range 1..9: {}", self.0)
    }
}

impl std::error::Error for InvalidSlotError {}

// ---------------------------------------------------------------------------
// Executor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// The multiplexer target was requested without an active tmux session.
    NoSession,
    /// The `tmux send-keys` invocation reported failure.
    SendFailed(String),
    /// The detached shell child could not be spawned. The child's own exit
    /// code is never observed; only the spawn itself can fail.
    SpawnFailed(String),
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::NoSession => write!(f, "no active tmux session"),
            ExecError::SendFailed(msg) => write!(f, "tmux send failed: {}", msg),
            ExecError::SpawnFailed(msg) => write!(f, "shell spawn failed: {}", msg),
        }
    }
}

impl std::error::Error for ExecError {}

// ---------------------------------------------------------------------------
// Dispatch errors
// ---------------------------------------------------------------------------

/// An executor failure tagged with the phase it aborted. Later phases of the
/// same dispatch are skipped entirely.
#[derive(Debug)]
pub struct DispatchError {
    pub phase: Phase,
    pub source: ExecError,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} phase failed: {}", self.phase.label(), self.source)
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
