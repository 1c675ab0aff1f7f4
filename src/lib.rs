//! chestboard
//!
//! A placement and reconciliation engine for a chest organizer board:
//! items carrying unique command tokens are arranged into chests, chests
//! into tabs, tabs into a profile. The crate models the full editing
//! session as pure state transitions, so a host UI only renders trees and
//! forwards gestures.
//!
//! The [`controller::BoardController`] is the front door; the modules
//! underneath expose the pieces for hosts that want finer control:
//!
//! - [`catalog`]: the palette of placeable item kinds
//! - [`selection`]: click-model multi-selection over placed items
//! - [`drag`]: gesture lifecycle and the hover tab-switch timer
//! - [`resolver`]: turns a (source, target) pair into a new tree
//! - [`history`]: snapshot undo/redo
//! - [`share`]: persistence shapes and compressed share codes

pub mod catalog;
pub mod controller;
pub mod domain;
pub mod drag;
pub mod history;
pub mod ids;
pub mod resolver;
pub mod selection;
pub mod share;
pub mod tree;

#[cfg(test)]
mod tests;

pub use catalog::{ItemCatalog, ItemKind};
pub use controller::{BoardController, Removal};
pub use domain::{
    build_command, command_budget, Chest, CommandBudget, DomainError, DomainResult, InsertError,
    Item, Profile, Tab, COMMAND_LIMIT, COMMAND_PREFIX,
};
pub use drag::{
    DragPhase, DragSource, DragState, DropTarget, TabSwitchTimer, TAB_SWITCH_DELAY_MS,
};
pub use history::History;
pub use ids::{IdAllocator, SequentialUidGenerator, UidGenerator};
pub use resolver::{resolve, Resolution};
pub use selection::Selection;
pub use share::{
    decode_share_code, export_profile, load_profile, minimal_profile, share_code, share_fragment,
    StoredChest, StoredItem, StoredProfile, StoredTab, SHARE_FRAGMENT_PREFIX,
};
