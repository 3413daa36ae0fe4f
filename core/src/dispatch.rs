//! Slot dispatch: prompt-fill, resolve, expand, route, execute.
//!
//! The sequence for a slot is pre → cmd → post in fixed order, empty phases
//! skipped. Each phase is expanded, routed, announced, then invoked; the
//! first executor failure halts the whole sequence — later phases are
//! neither announced nor invoked.

use crate::errors::DispatchError;
use crate::host::{Host, NotifyLevel};
use crate::infrastructure::ExecBackend;
use crate::resolve::resolve;
use crate::route::{route, Target};
use crate::store::ProjectStore;
use crate::template::{expand, TemplateContext};
use crate::types::{GlobalConfig, SlotIndex};

/// How a dispatch ended short of an executor failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Every non-empty phase ran.
    Completed,
    /// The command prompt was cancelled or answered empty; nothing happened.
    Cancelled,
}

/// Dispatch one slot.
///
/// A slot with an empty `cmd` first asks the host for one; a cancelled or
/// empty reply aborts with no side effects. A supplied command is persisted
/// (save failures are notified and otherwise ignored) before the dispatch
/// proceeds with the now-populated slot.
pub fn run_slot<B: ExecBackend + ?Sized>(
    store: &mut ProjectStore,
    global: &GlobalConfig,
    host: &dyn Host,
    backend: &B,
    index: SlotIndex,
) -> Result<DispatchOutcome, DispatchError> {
    if store.state().slot(index).cmd.is_empty() {
        let reply = match host.prompt(&format!("Command for slot {}: ", index)) {
            Some(text) if !text.is_empty() => text,
            _ => return Ok(DispatchOutcome::Cancelled),
        };
        store.state_mut().slot_mut(index).cmd = reply;
        if let Err(e) = store.save() {
            host.notify(NotifyLevel::Error, &e.to_string());
        }
    }

    let state = store.state();
    let resolved = resolve(state.slot(index), state, global);
    let ctx = TemplateContext {
        file: host
            .current_file()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default(),
        cwd: host.cwd().to_string_lossy().into_owned(),
        window_id: global.window_id.clone(),
    };

    for (phase, raw) in resolved.phases() {
        let expanded = expand(raw, &ctx, backend);
        let (target, body) = route(&expanded);
        host.notify(
            NotifyLevel::Info,
            &format!("running {}: {}", phase.label(), body),
        );
        let result = match target {
            Target::Multiplexer => backend.send_to_pane(&global.window_id, body),
            Target::Shell => backend.spawn_detached(body),
        };
        if let Err(source) = result {
            return Err(DispatchError { phase, source });
        }
    }
    Ok(DispatchOutcome::Completed)
}
