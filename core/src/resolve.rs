//! Hook resolution: the slot → project → global cascade.

use crate::types::{GlobalConfig, ProjectState, Slot};

/// One step of a dispatch sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pre,
    Cmd,
    Post,
}

impl Phase {
    pub fn label(&self) -> &str {
        match self {
            Phase::Pre => "pre",
            Phase::Cmd => "cmd",
            Phase::Post => "post",
        }
    }
}

/// The effective pre/cmd/post strings for one slot after cascading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub pre: String,
    pub cmd: String,
    pub post: String,
}

impl Resolved {
    /// The ordered dispatch sequence, with empty entries skipped entirely.
    pub fn phases(&self) -> Vec<(Phase, &str)> {
        [
            (Phase::Pre, self.pre.as_str()),
            (Phase::Cmd, self.cmd.as_str()),
            (Phase::Post, self.post.as_str()),
        ]
        .into_iter()
        .filter(|(_, text)| !text.is_empty())
        .collect()
    }
}

/// Resolve a slot against project and global defaults.
///
/// `pre` and `post` cascade independently: the slot value wins when non-empty,
/// then the project default, then the global default. `cmd` has no fallback —
/// it is the slot's verbatim value.
pub fn resolve(slot: &Slot, project: &ProjectState, global: &GlobalConfig) -> Resolved {
    Resolved {
        pre: cascade(&slot.pre, &project.default_pre, &global.default_pre),
        cmd: slot.cmd.clone(),
        post: cascade(&slot.post, &project.default_post, &global.default_post),
    }
}

fn cascade(slot: &str, project: &str, global: &str) -> String {
    for value in [slot, project, global] {
        if !value.is_empty() {
            return value.to_string();
        }
    }
    String::new()
}
