//! Central runtime: owns all state and dispatches commands.
//!
//! `Engine` is the explicit context object the hosting UI talks to. It owns
//! the per-project store (loaded once, flushed after every mutation), the
//! global configuration, and the host/backend collaborators. Every public
//! operation enters through [`Engine::execute`].

use crate::command::{Command, Response};
use crate::dispatch::run_slot;
use crate::host::{Host, NotifyLevel};
use crate::infrastructure::ExecBackend;
use crate::store::ProjectStore;
use crate::types::{GlobalConfig, SlotIndex};

pub struct Engine<H: Host, B: ExecBackend> {
    store: ProjectStore,
    global: GlobalConfig,
    host: H,
    backend: B,
}

impl<H: Host, B: ExecBackend> Engine<H, B> {
    /// Build an engine for the host's working directory.
    pub fn new(global: GlobalConfig, host: H, backend: B) -> Engine<H, B> {
        let store = ProjectStore::new(&host.cwd());
        Engine {
            store,
            global,
            host,
            backend,
        }
    }

    pub fn global(&self) -> &GlobalConfig {
        &self.global
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The single dispatch method. Every command enters here.
    pub fn execute(&mut self, cmd: Command) -> Response {
        match cmd {
            Command::Configure { patch } => {
                self.global.merge(patch);
                Response::ok("")
            }
            Command::List => self.cmd_list(),
            Command::Run { index } => match self.slot_index(index) {
                Ok(i) => self.cmd_run(i),
                Err(resp) => resp,
            },
            Command::Edit { index } => match self.slot_index(index) {
                Ok(i) => self.cmd_edit(i),
                Err(resp) => resp,
            },
            Command::Delete { index } => match self.slot_index(index) {
                Ok(i) => self.cmd_delete(i),
                Err(resp) => resp,
            },
            Command::SetDefaults { pre, post } => self.cmd_set_defaults(pre, post),
            Command::Manage => self.cmd_manage(),
        }
    }

    fn slot_index(&self, index: u8) -> Result<SlotIndex, Response> {
        SlotIndex::new(index).map_err(|e| Response::error(e.to_string()))
    }

    /// Flush the store; save failures are notified and otherwise ignored
    /// (the in-memory state is already updated).
    fn save_and_notify(&mut self) {
        if let Err(e) = self.store.save() {
            self.host.notify(NotifyLevel::Error, &e.to_string());
        }
    }

    fn cmd_list(&mut self) -> Response {
        let state = self.store.state();
        let mut lines = Vec::new();
        for (index, slot) in state.iter() {
            let mut line = if slot.cmd.is_empty() {
                format!("{}: (empty)", index)
            } else {
                format!("{}: {}", index, slot.cmd)
            };
            if !slot.pre.is_empty() {
                line.push_str(&format!("  [pre: {}]", slot.pre));
            }
            if !slot.post.is_empty() {
                line.push_str(&format!("  [post: {}]", slot.post));
            }
            lines.push(line);
        }
        if !state.default_pre.is_empty() {
            lines.push(format!("project pre: {}", state.default_pre));
        }
        if !state.default_post.is_empty() {
            lines.push(format!("project post: {}", state.default_post));
        }
        Response::ok(lines.join("\n"))
    }

    fn cmd_run(&mut self, index: SlotIndex) -> Response {
        match run_slot(
            &mut self.store,
            &self.global,
            &self.host,
            &self.backend,
            index,
        ) {
            Ok(_) => Response::ok(""),
            Err(e) => Response::error(e.to_string()),
        }
    }

    fn cmd_edit(&mut self, index: SlotIndex) -> Response {
        let current = self.store.state().slot(index).clone();

        // Cancelling the command prompt aborts the whole edit untouched.
        let cmd = match self.host.prompt(&format!("Slot {} command: ", index)) {
            Some(text) => text,
            None => return Response::ok(""),
        };
        // Cancelling a hook prompt keeps that hook's existing value.
        let pre = self
            .host
            .prompt(&format!("Slot {} pre hook: ", index))
            .unwrap_or(current.pre);
        let post = self
            .host
            .prompt(&format!("Slot {} post hook: ", index))
            .unwrap_or(current.post);

        {
            let slot = self.store.state_mut().slot_mut(index);
            slot.cmd = cmd;
            slot.pre = pre;
            slot.post = post;
        }
        self.save_and_notify();
        Response::ok(format!("slot {} updated", index))
    }

    fn cmd_delete(&mut self, index: SlotIndex) -> Response {
        self.store.state_mut().slot_mut(index).clear();
        self.save_and_notify();
        Response::ok(format!("slot {} cleared", index))
    }

    fn cmd_set_defaults(&mut self, pre: String, post: String) -> Response {
        let state = self.store.state_mut();
        state.default_pre = pre;
        state.default_post = post;
        self.save_and_notify();
        Response::ok("project defaults updated")
    }

    fn cmd_manage(&mut self) -> Response {
        let options: Vec<String> = self
            .store
            .state()
            .iter()
            .map(|(index, slot)| {
                if slot.cmd.is_empty() {
                    format!("{}: (empty)", index)
                } else {
                    format!("{}: {}", index, slot.cmd)
                }
            })
            .collect();

        let picked = match self.host.select("Slot: ", &options) {
            Some(i) => i as u8 + 1,
            None => return Response::ok(""),
        };
        let index = match self.slot_index(picked) {
            Ok(i) => i,
            Err(resp) => return resp,
        };

        let actions: Vec<String> = vec!["run".into(), "edit".into(), "delete".into()];
        match self.host.select("Action: ", &actions) {
            Some(0) => self.cmd_run(index),
            Some(1) => self.cmd_edit(index),
            Some(2) => self.cmd_delete(index),
            _ => Response::ok(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MockHost;
    use crate::infrastructure::mock::{Invocation, MockBackend};
    use crate::types::ConfigPatch;
    use crate::store::STORE_FILE;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    static DIR_SEQ: AtomicU32 = AtomicU32::new(0);

    struct Scratch(PathBuf);

    impl Scratch {
        fn new() -> Scratch {
            let dir = std::env::temp_dir().join(format!(
                "cmdslot_engine_test_{}_{}",
                std::process::id(),
                DIR_SEQ.fetch_add(1, Ordering::SeqCst)
            ));
            std::fs::create_dir_all(&dir).unwrap();
            Scratch(dir)
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    impl Scratch {
        fn host(&self) -> MockHost {
            MockHost::new(&self.0.to_string_lossy())
        }
    }

    fn engine(host: MockHost) -> Engine<MockHost, MockBackend> {
        Engine::new(GlobalConfig::default(), host, MockBackend::new())
    }

    #[test]
    fn configure_merges_into_global() {
        let dir = Scratch::new();
        let mut engine = engine(dir.host());
        let resp = engine.execute(Command::Configure {
            patch: ConfigPatch {
                window_id: Some("dev:2".into()),
                ..ConfigPatch::default()
            },
        });
        assert_eq!(resp, Response::ok(""));
        assert_eq!(engine.global().window_id, "dev:2");
        assert_eq!(engine.global().default_pre, ""); // untouched
    }

    #[test]
    fn run_rejects_out_of_range_index() {
        let dir = Scratch::new();
        let mut engine = engine(dir.host());
        let resp = engine.execute(Command::Run { index: 0 });
        match resp {
            Response::Error { message } => assert!(message.contains("out of range")),
            other => panic!("expected error, got {:?}", other),
        }
        assert!(engine.backend().invocations().is_empty());
    }

    #[test]
    fn run_dispatches_populated_slot() {
        let dir = Scratch::new();
        std::fs::write(dir.0.join(STORE_FILE), r#"{"3": "make test"}"#).unwrap();
        let mut engine = engine(dir.host());

        let resp = engine.execute(Command::Run { index: 3 });
        assert_eq!(resp, Response::ok(""));
        assert_eq!(
            engine.backend().invocations(),
            vec![Invocation::Send("{last}".into(), "make test".into())]
        );
    }

    #[test]
    fn run_surfaces_dispatch_failure() {
        let dir = Scratch::new();
        std::fs::write(dir.0.join(STORE_FILE), r#"{"1": "make"}"#).unwrap();
        let host = dir.host();
        let backend = MockBackend::new().failing_at(0, crate::errors::ExecError::NoSession);
        let mut engine = Engine::new(GlobalConfig::default(), host, backend);

        match engine.execute(Command::Run { index: 1 }) {
            Response::Error { message } => {
                assert!(message.contains("no active tmux session"));
                assert!(message.contains("cmd phase"));
            }
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn edit_prompts_and_persists_all_fields() {
        let dir = Scratch::new();
        let host = dir.host().with_prompts(vec![
            Some("make test".into()),
            Some("make fmt".into()),
            Some(String::new()),
        ]);
        let mut engine = engine(host);

        let resp = engine.execute(Command::Edit { index: 2 });
        assert_eq!(resp, Response::ok("slot 2 updated"));

        let content = std::fs::read_to_string(dir.0.join(STORE_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["slots"]["2"]["cmd"], "make test");
        assert_eq!(value["slots"]["2"]["pre"], "make fmt");
        assert_eq!(value["slots"]["2"]["post"], "");
    }

    #[test]
    fn edit_cancelled_at_command_changes_nothing() {
        let dir = Scratch::new();
        std::fs::write(dir.0.join(STORE_FILE), r#"{"2": "original"}"#).unwrap();
        let mut engine = engine(dir.host()); // no replies = cancel

        let resp = engine.execute(Command::Edit { index: 2 });
        assert_eq!(resp, Response::ok(""));
        // Legacy file untouched: edit aborted before any save.
        let content = std::fs::read_to_string(dir.0.join(STORE_FILE)).unwrap();
        assert_eq!(content, r#"{"2": "original"}"#);
    }

    #[test]
    fn edit_cancelled_hook_keeps_existing_value() {
        let dir = Scratch::new();
        std::fs::write(
            dir.0.join(STORE_FILE),
            r#"{"_project_default_pre": "", "_project_default_post": "",
                "slots": {"1": {"cmd": "make", "pre": "old-pre", "post": "old-post"}}}"#,
        )
        .unwrap();
        // cmd answered; pre and post prompts cancelled.
        let host = dir.host().with_prompts(vec![Some("make -j".into())]);
        let mut engine = engine(host);

        engine.execute(Command::Edit { index: 1 });
        let content = std::fs::read_to_string(dir.0.join(STORE_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["slots"]["1"]["cmd"], "make -j");
        assert_eq!(value["slots"]["1"]["pre"], "old-pre");
        assert_eq!(value["slots"]["1"]["post"], "old-post");
    }

    #[test]
    fn delete_clears_and_persists() {
        let dir = Scratch::new();
        std::fs::write(dir.0.join(STORE_FILE), r#"{"4": "make"}"#).unwrap();
        let mut engine = engine(dir.host());

        let resp = engine.execute(Command::Delete { index: 4 });
        assert_eq!(resp, Response::ok("slot 4 cleared"));

        let content = std::fs::read_to_string(dir.0.join(STORE_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["slots"]["4"]["cmd"], "");
    }

    #[test]
    fn set_defaults_persists() {
        let dir = Scratch::new();
        let mut engine = engine(dir.host());

        let resp = engine.execute(Command::SetDefaults {
            pre: "make fmt".into(),
            post: "echo ok".into(),
        });
        assert_eq!(resp, Response::ok("project defaults updated"));

        let content = std::fs::read_to_string(dir.0.join(STORE_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["_project_default_pre"], "make fmt");
        assert_eq!(value["_project_default_post"], "echo ok");
    }

    #[test]
    fn list_renders_slots_and_defaults() {
        let dir = Scratch::new();
        std::fs::write(
            dir.0.join(STORE_FILE),
            r#"{"_project_default_pre": "setup", "_project_default_post": "",
                "slots": {"1": {"cmd": "make", "pre": "fmt", "post": ""}}}"#,
        )
        .unwrap();
        let mut engine = engine(dir.host());

        match engine.execute(Command::List) {
            Response::Ok { output } => {
                assert!(output.contains("1: make  [pre: fmt]"));
                assert!(output.contains("2: (empty)"));
                assert!(output.contains("9: (empty)"));
                assert!(output.contains("project pre: setup"));
                assert!(!output.contains("project post:"));
            }
            other => panic!("expected output, got {:?}", other),
        }
    }

    #[test]
    fn manage_run_path() {
        let dir = Scratch::new();
        std::fs::write(dir.0.join(STORE_FILE), r#"{"2": "make"}"#).unwrap();
        // Pick slot 2 (position 1), then action "run" (position 0).
        let host = dir.host().with_selections(vec![Some(1), Some(0)]);
        let mut engine = engine(host);

        engine.execute(Command::Manage);
        assert_eq!(
            engine.backend().invocations(),
            vec![Invocation::Send("{last}".into(), "make".into())]
        );
    }

    #[test]
    fn manage_delete_path() {
        let dir = Scratch::new();
        std::fs::write(dir.0.join(STORE_FILE), r#"{"1": "make"}"#).unwrap();
        let host = dir.host().with_selections(vec![Some(0), Some(2)]);
        let mut engine = engine(host);

        let resp = engine.execute(Command::Manage);
        assert_eq!(resp, Response::ok("slot 1 cleared"));
    }

    #[test]
    fn manage_cancelled_picker_is_silent() {
        let dir = Scratch::new();
        let mut engine = engine(dir.host());
        assert_eq!(engine.execute(Command::Manage), Response::ok(""));
        assert!(engine.backend().invocations().is_empty());
    }
}
