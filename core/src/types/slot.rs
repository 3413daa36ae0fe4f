//! Slot and project-state types.
//!
//! A project owns exactly nine command slots, indexed 1..=9. Every field uses
//! the empty string as its "unset" sentinel — that is what drives both the
//! resolution cascade and the "prompt for a missing command" flow.

use crate::errors::InvalidSlotError;

/// Number of slots per project. Fixed; the set never grows or shrinks.
pub const SLOT_COUNT: usize = 9;

// ---------------------------------------------------------------------------
// SlotIndex
// ---------------------------------------------------------------------------

/// A validated slot index in 1..=9.
///
/// Construction is the only fallible point; everything downstream takes a
/// `SlotIndex` and can access slots infallibly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SlotIndex(u8);

impl SlotIndex {
    /// Validate a raw index. Values outside 1..=9 are a contract violation.
    pub fn new(index: u8) -> Result<SlotIndex, InvalidSlotError> {
        if (1..=SLOT_COUNT as u8).contains(&index) {
            Ok(SlotIndex(index))
        } else {
            Err(InvalidSlotError(index))
        }
    }

    /// The 1-based index value.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position for array access.
    pub(crate) fn pos(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Iterate all nine indices in order.
    pub fn all() -> impl Iterator<Item = SlotIndex> {
        (1..=SLOT_COUNT as u8).map(SlotIndex)
    }
}

impl std::fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Slot
// ---------------------------------------------------------------------------

/// One command slot. Empty string means "unset" for every field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slot {
    /// The command itself. No higher-level fallback exists for this field.
    pub cmd: String,
    /// Hook run before `cmd`. Cascades to project/global defaults when empty.
    pub pre: String,
    /// Hook run after `cmd`. Cascades like `pre`.
    pub post: String,
}

impl Slot {
    /// True when every field is unset.
    pub fn is_empty(&self) -> bool {
        self.cmd.is_empty() && self.pre.is_empty() && self.post.is_empty()
    }

    /// Reset all fields to unset.
    pub fn clear(&mut self) {
        self.cmd.clear();
        self.pre.clear();
        self.post.clear();
    }
}

// ---------------------------------------------------------------------------
// ProjectState
// ---------------------------------------------------------------------------

/// Per-project persisted state: nine slots plus project-level hook defaults.
///
/// Always holds exactly [`SLOT_COUNT`] slots, including freshly created and
/// legacy-upgraded states.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectState {
    /// Project-level default for `pre`, used when a slot's own is empty.
    pub default_pre: String,
    /// Project-level default for `post`.
    pub default_post: String,
    slots: [Slot; SLOT_COUNT],
}

impl ProjectState {
    /// A fresh state: nine empty slots, empty defaults.
    pub fn new() -> ProjectState {
        ProjectState::default()
    }

    pub fn slot(&self, index: SlotIndex) -> &Slot {
        &self.slots[index.pos()]
    }

    pub fn slot_mut(&mut self, index: SlotIndex) -> &mut Slot {
        &mut self.slots[index.pos()]
    }

    /// All slots in index order, with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, &Slot)> {
        SlotIndex::all().map(move |i| (i, &self.slots[i.pos()]))
    }
}
