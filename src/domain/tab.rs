//! Tab Entity
//!
//! An ordered group of chests.

use serde::{Deserialize, Serialize};

use super::chest::Chest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub chests: Vec<Chest>,
}

impl Tab {
    pub fn new(id: u32, name: &str) -> Tab {
        Tab {
            id,
            name: name.to_string(),
            chests: Vec::new(),
        }
    }

    pub fn chest(&self, chest_id: u32) -> Option<&Chest> {
        self.chests.iter().find(|c| c.id == chest_id)
    }

    /// True when none of the chests hold any items.
    pub fn has_no_items(&self) -> bool {
        self.chests.iter().all(|c| c.items.is_empty())
    }
}
