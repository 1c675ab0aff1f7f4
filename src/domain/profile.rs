//! Profile Entity
//!
//! The root persisted entity: a name plus ordered tabs.

use serde::{Deserialize, Serialize};

use super::chest::Chest;
use super::tab::Tab;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub tabs: Vec<Tab>,
}

impl Profile {
    /// Fresh default profile: one tab holding one empty chest.
    pub fn starter() -> Profile {
        let mut tab = Tab::new(1, "Tab 1");
        tab.chests.push(Chest::starter(1));
        Profile {
            name: "New Profile".to_string(),
            tabs: vec![tab],
        }
    }
}
