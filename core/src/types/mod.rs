pub mod config;
pub mod slot;

pub use config::{ConfigPatch, GlobalConfig};
pub use slot::{ProjectState, Slot, SlotIndex, SLOT_COUNT};
