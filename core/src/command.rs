//! Command — the typed interface for all cmdslot operations.
//!
//! Every operation the hosting UI can trigger is a variant of the `Command`
//! enum, dispatched through `Engine::execute()`, which answers with a
//! `Response`.

use crate::types::ConfigPatch;

/// A typed operation request.
///
/// Slot indices arrive as raw `u8` values and are validated inside the
/// engine; out-of-range values are a contract violation answered with an
/// error response.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Merge a partial override into the global configuration.
    Configure { patch: ConfigPatch },

    /// Render the nine slots plus the project-level defaults.
    List,

    /// Dispatch a slot, prompting for its command first if unset.
    Run { index: u8 },

    /// Re-prompt for a slot's command, pre, and post.
    Edit { index: u8 },

    /// Clear a slot back to fully unset.
    Delete { index: u8 },

    /// Set the project-level pre/post defaults.
    SetDefaults { pre: String, post: String },

    /// Interactive picker: choose a slot, then run/edit/delete it.
    Manage,
}

/// The outcome of one executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Ok { output: String },
    Error { message: String },
}

impl Response {
    pub fn ok(output: impl Into<String>) -> Response {
        Response::Ok {
            output: output.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Response {
        Response::Error {
            message: message.into(),
        }
    }
}
