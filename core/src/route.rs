//! Execution-target routing.
//!
//! A command string may start with a bracketed tag selecting its backend:
//! `[sh] cargo build` spawns a detached shell, `[tmux] make` targets the
//! multiplexer pane. Unrecognized tags fall back to the multiplexer with the
//! original string untouched — a malformed tag must not silently alter the
//! command the user wrote.

/// Execution backend for one command string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Send as keystrokes to the configured tmux window.
    Multiplexer,
    /// Spawn detached through the shell, output discarded.
    Shell,
}

/// Split a raw command string into its target and body.
///
/// The tag must appear at the very start, with no leading whitespace, and is
/// matched case-insensitively. Recognized tags are stripped (plus any
/// whitespace separating them from the body); anything else routes the full
/// original string to the multiplexer.
pub fn route(raw: &str) -> (Target, &str) {
    if let Some((tag, body)) = leading_tag(raw) {
        match tag.to_ascii_lowercase().as_str() {
            "sh" | "shell" => return (Target::Shell, body),
            "tmux" => return (Target::Multiplexer, body),
            _ => {}
        }
    }
    (Target::Multiplexer, raw)
}

/// Extract a `[tag]` prefix, returning the tag text and the remainder with
/// leading whitespace stripped.
fn leading_tag(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix('[')?;
    let close = rest.find(']')?;
    Some((&rest[..close], rest[close + 1..].trim_start()))
}
