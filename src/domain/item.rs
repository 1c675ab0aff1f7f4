//! Item Entity
//!
//! A placed instance of an item kind.

use serde::{Deserialize, Serialize};

/// One placed item.
///
/// `uid` identifies this particular placement; sidebar-source items use
/// their kind name as a stable uid until they are cloned into a chest.
/// `variable` is the command token that must stay unique within a chest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub uid: String,
    /// Kind name, e.g. "recovery_compass"
    pub item: String,
    pub variable: String,
    pub image: String,
}

impl Item {
    /// Copy of this item carrying a different placement uid.
    pub fn with_uid(&self, uid: String) -> Item {
        Item { uid, ..self.clone() }
    }

    /// Human-readable name: underscores become spaces.
    pub fn display_name(&self) -> String {
        self.item.replace('_', " ")
    }
}
