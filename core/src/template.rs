//! Placeholder templating for command strings.
//!
//! Substitution is a single pass over the original text: a placeholder that
//! appears inside another expansion's *output* is left alone. The session
//! name is the only environment-dependent value, so it sits behind the
//! `SessionSource` trait and is queried lazily — only when `%s` actually
//! occurs, and at most once per expansion.

use std::path::Path;

/// Source of the active multiplexer session name.
///
/// Returns the empty string when no session can be determined.
pub trait SessionSource {
    fn session_name(&self) -> String;
}

/// Fixed session value, for tests and offline expansion.
pub struct FixedSession(pub String);

impl SessionSource for FixedSession {
    fn session_name(&self) -> String {
        self.0.clone()
    }
}

/// Contextual values for expansion. All are plain strings; empty means the
/// host could not provide the value.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    /// `%f` — full path of the current file.
    pub file: String,
    /// `%cwd` — current working directory.
    pub cwd: String,
    /// `%w` — configured window id.
    pub window_id: String,
}

impl TemplateContext {
    /// Basename of the current file (`%F`).
    fn file_name(&self) -> String {
        Path::new(&self.file)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Expand all recognized placeholders in `text`.
///
/// An empty input short-circuits to empty output without touching `session`.
pub fn expand<S: SessionSource + ?Sized>(text: &str, ctx: &TemplateContext, session: &S) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(text.len());
    let mut session_name: Option<String> = None;
    let mut rest = text;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 1..];

        // Longest token first: %cwd shadows no single-letter token but must
        // be tried before falling through to the literal '%'.
        if let Some(after) = tail.strip_prefix("cwd") {
            out.push_str(&ctx.cwd);
            rest = after;
        } else if let Some(after) = tail.strip_prefix('f') {
            out.push_str(&ctx.file);
            rest = after;
        } else if let Some(after) = tail.strip_prefix('F') {
            out.push_str(&ctx.file_name());
            rest = after;
        } else if let Some(after) = tail.strip_prefix('w') {
            out.push_str(&ctx.window_id);
            rest = after;
        } else if let Some(after) = tail.strip_prefix('s') {
            let name = session_name.get_or_insert_with(|| session.session_name());
            out.push_str(name);
            rest = after;
        } else {
            out.push('%');
            rest = tail;
        }
    }
    out.push_str(rest);
    out
}
