//! Per-project slot persistence.
//!
//! Each project directory owns one `.cmdslot.json` file. `ProjectStore` holds
//! the path plus a lazily-loaded in-memory cache: exactly one `ProjectState`
//! per store, populated on first access and reused for every read in the same
//! run. Mutations go through the cache and must be followed by `save()`.
//!
//! Two on-disk shapes exist. The current shape carries project defaults and
//! structured slots; the legacy shape is a flat index→command map. The
//! duality is modeled as an untagged enum at the deserialization boundary and
//! normalized to `ProjectState` immediately — nothing downstream of load ever
//! branches on format. A legacy file is rewritten in the current shape only
//! on the next explicit save.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::types::{ProjectState, Slot, SlotIndex};

/// Fixed file name, one per project directory.
pub const STORE_FILE: &str = ".cmdslot.json";

// ---------------------------------------------------------------------------
// On-disk shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SlotFile {
    #[serde(default)]
    cmd: String,
    #[serde(default)]
    pre: String,
    #[serde(default)]
    post: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct CurrentFile {
    #[serde(rename = "_project_default_pre", default)]
    default_pre: String,
    #[serde(rename = "_project_default_post", default)]
    default_post: String,
    // Required: its absence is what marks a file as legacy.
    slots: BTreeMap<String, SlotFile>,
}

/// The deserialization boundary. `Current` is tried first; a flat
/// index→command map (no `slots` field) parses as `Legacy`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PersistedFile {
    Current(CurrentFile),
    Legacy(BTreeMap<String, String>),
}

fn normalize(file: PersistedFile) -> ProjectState {
    let mut state = ProjectState::new();
    match file {
        PersistedFile::Current(current) => {
            state.default_pre = current.default_pre;
            state.default_post = current.default_post;
            for index in SlotIndex::all() {
                if let Some(entry) = current.slots.get(&index.to_string()) {
                    *state.slot_mut(index) = Slot {
                        cmd: entry.cmd.clone(),
                        pre: entry.pre.clone(),
                        post: entry.post.clone(),
                    };
                }
            }
        }
        PersistedFile::Legacy(map) => {
            // Upgrade in memory: commands only, everything else stays empty.
            for index in SlotIndex::all() {
                if let Some(cmd) = map.get(&index.to_string()) {
                    state.slot_mut(index).cmd = cmd.clone();
                }
            }
        }
    }
    state
}

fn denormalize(state: &ProjectState) -> CurrentFile {
    let mut slots = BTreeMap::new();
    for (index, slot) in state.iter() {
        slots.insert(
            index.to_string(),
            SlotFile {
                cmd: slot.cmd.clone(),
                pre: slot.pre.clone(),
                post: slot.post.clone(),
            },
        );
    }
    CurrentFile {
        default_pre: state.default_pre.clone(),
        default_post: state.default_post.clone(),
        slots,
    }
}

// ---------------------------------------------------------------------------
// ProjectStore
// ---------------------------------------------------------------------------

/// Loads, caches, and saves the project state for one directory.
pub struct ProjectStore {
    path: PathBuf,
    cache: Option<ProjectState>,
}

impl ProjectStore {
    /// A store keyed by the given project directory.
    pub fn new(project_dir: &Path) -> ProjectStore {
        ProjectStore {
            path: project_dir.join(STORE_FILE),
            cache: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The cached state, loading it on first access. A missing, unreadable,
    /// or corrupt file yields a fresh empty state rather than an error.
    pub fn state(&mut self) -> &ProjectState {
        self.ensure_loaded();
        self.cache.as_ref().unwrap()
    }

    /// Mutable access to the cached state. Callers must `save()` afterwards
    /// for the mutation to be considered complete.
    pub fn state_mut(&mut self) -> &mut ProjectState {
        self.ensure_loaded();
        self.cache.as_mut().unwrap()
    }

    fn ensure_loaded(&mut self) {
        if self.cache.is_none() {
            self.cache = Some(read_state(&self.path).unwrap_or_default());
        }
    }

    /// Serialize the cached state and write it atomically (temp file in the
    /// same directory, then rename).
    pub fn save(&mut self) -> Result<(), StoreError> {
        self.ensure_loaded();
        let file = denormalize(self.cache.as_ref().unwrap());
        let mut content = serde_json::to_string_pretty(&file).map_err(StoreError::Encode)?;
        content.push('\n');

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, &content).map_err(|source| StoreError::Write {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Parse the persisted file into a normalized state. Every failure is a
/// `Decode`-class problem the caller recovers from with a fresh state.
fn read_state(path: &Path) -> Result<ProjectState, StoreError> {
    let content = std::fs::read_to_string(path).map_err(|_| {
        StoreError::Decode(serde::de::Error::custom("unreadable"))
    })?;
    let file: PersistedFile = serde_json::from_str(&content).map_err(StoreError::Decode)?;
    Ok(normalize(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    static DIR_SEQ: AtomicU32 = AtomicU32::new(0);

    /// Unique scratch directory per test, removed by `Scratch::drop`.
    struct Scratch(PathBuf);

    impl Scratch {
        fn new() -> Scratch {
            let dir = std::env::temp_dir().join(format!(
                "cmdslot_store_test_{}_{}",
                std::process::id(),
                DIR_SEQ.fetch_add(1, Ordering::SeqCst)
            ));
            std::fs::create_dir_all(&dir).unwrap();
            Scratch(dir)
        }

        fn path(&self) -> &Path {
            &self.0
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    fn idx(i: u8) -> SlotIndex {
        SlotIndex::new(i).unwrap()
    }

    #[test]
    fn missing_file_loads_fresh_state() {
        let scratch = Scratch::new();
        let mut store = ProjectStore::new(scratch.path());
        assert_eq!(*store.state(), ProjectState::new());
    }

    #[test]
    fn corrupt_file_loads_fresh_state() {
        let scratch = Scratch::new();
        std::fs::write(scratch.path().join(STORE_FILE), "{not json").unwrap();
        let mut store = ProjectStore::new(scratch.path());
        assert_eq!(*store.state(), ProjectState::new());
    }

    #[test]
    fn wrong_structure_loads_fresh_state() {
        let scratch = Scratch::new();
        std::fs::write(
            scratch.path().join(STORE_FILE),
            r#"{"slots": "not a map"}"#,
        )
        .unwrap();
        let mut store = ProjectStore::new(scratch.path());
        assert_eq!(*store.state(), ProjectState::new());
    }

    #[test]
    fn save_then_load_round_trips() {
        let scratch = Scratch::new();
        let mut store = ProjectStore::new(scratch.path());
        store.state_mut().slot_mut(idx(1)).cmd = "make test".into();
        store.state_mut().slot_mut(idx(1)).pre = "make fmt".into();
        store.state_mut().default_post = "notify".into();
        store.save().unwrap();

        let mut reloaded = ProjectStore::new(scratch.path());
        assert_eq!(reloaded.state(), store.state());
    }

    #[test]
    fn save_is_byte_idempotent() {
        let scratch = Scratch::new();
        let file = scratch.path().join(STORE_FILE);

        let mut store = ProjectStore::new(scratch.path());
        store.state_mut().slot_mut(idx(2)).cmd = "./a.out".into();
        store.save().unwrap();
        let first = std::fs::read(&file).unwrap();

        let mut again = ProjectStore::new(scratch.path());
        again.state();
        again.save().unwrap();
        let second = std::fs::read(&file).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn legacy_file_upgrades_in_memory() {
        let scratch = Scratch::new();
        std::fs::write(
            scratch.path().join(STORE_FILE),
            r#"{"1": "make", "2": "./a.out"}"#,
        )
        .unwrap();

        let mut store = ProjectStore::new(scratch.path());
        let state = store.state();
        assert_eq!(state.slot(idx(1)).cmd, "make");
        assert_eq!(state.slot(idx(1)).pre, "");
        assert_eq!(state.slot(idx(2)).cmd, "./a.out");
        for i in 3..=9 {
            assert!(state.slot(idx(i)).is_empty());
        }
        assert!(state.default_pre.is_empty());
        assert!(state.default_post.is_empty());
    }

    #[test]
    fn legacy_file_untouched_until_explicit_save() {
        let scratch = Scratch::new();
        let file = scratch.path().join(STORE_FILE);
        let legacy = r#"{"1": "make"}"#;
        std::fs::write(&file, legacy).unwrap();

        let mut store = ProjectStore::new(scratch.path());
        store.state();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), legacy);

        store.save().unwrap();
        let written = std::fs::read_to_string(&file).unwrap();
        assert!(written.contains("\"slots\""));
        assert!(written.contains("\"_project_default_pre\""));
    }

    #[test]
    fn legacy_unknown_keys_ignored() {
        let scratch = Scratch::new();
        std::fs::write(
            scratch.path().join(STORE_FILE),
            r#"{"1": "make", "12": "nope", "x": "nope"}"#,
        )
        .unwrap();
        let mut store = ProjectStore::new(scratch.path());
        assert_eq!(store.state().slot(idx(1)).cmd, "make");
        assert_eq!(store.state().iter().filter(|(_, s)| !s.is_empty()).count(), 1);
    }

    #[test]
    fn current_file_with_missing_slots_fills_empties() {
        let scratch = Scratch::new();
        std::fs::write(
            scratch.path().join(STORE_FILE),
            r#"{"_project_default_pre": "setup", "_project_default_post": "",
                "slots": {"3": {"cmd": "go", "pre": "", "post": ""}}}"#,
        )
        .unwrap();
        let mut store = ProjectStore::new(scratch.path());
        let state = store.state();
        assert_eq!(state.default_pre, "setup");
        assert_eq!(state.slot(idx(3)).cmd, "go");
        assert_eq!(state.iter().count(), 9);
    }

    #[test]
    fn save_writes_all_nine_slots() {
        let scratch = Scratch::new();
        let mut store = ProjectStore::new(scratch.path());
        store.state_mut().slot_mut(idx(5)).cmd = "run".into();
        store.save().unwrap();

        let content = std::fs::read_to_string(scratch.path().join(STORE_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        let slots = value["slots"].as_object().unwrap();
        assert_eq!(slots.len(), 9);
        for i in 1..=9 {
            assert!(slots.contains_key(&i.to_string()));
        }
        assert_eq!(value["slots"]["5"]["cmd"], "run");
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let scratch = Scratch::new();
        let mut store = ProjectStore::new(scratch.path());
        store.save().unwrap();
        let names: Vec<String> = std::fs::read_dir(scratch.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![STORE_FILE.to_string()]);
    }

    #[test]
    fn save_to_unwritable_dir_is_write_error() {
        let mut store = ProjectStore::new(Path::new("/nonexistent_cmdslot_dir_xyz"));
        match store.save() {
            Err(StoreError::Write { .. }) => {}
            other => panic!("expected Write error, got {:?}", other.err().map(|e| e.to_string())),
        }
    }

    #[test]
    fn cache_survives_external_file_change() {
        let scratch = Scratch::new();
        let mut store = ProjectStore::new(scratch.path());
        store.state_mut().slot_mut(idx(1)).cmd = "make".into();
        // Overwrite the file behind the cache's back.
        std::fs::write(scratch.path().join(STORE_FILE), r#"{"1": "other"}"#).unwrap();
        assert_eq!(store.state().slot(idx(1)).cmd, "make");
    }
}
