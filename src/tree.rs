//! Tree Utilities
//!
//! Read-only queries and small structural helpers over the tab tree.

use crate::domain::{Chest, Item, Tab};

/// Locate a placed item anywhere in the tree.
/// Returns (tab id, chest id, index within chest, item).
pub fn find_item<'a>(tabs: &'a [Tab], uid: &str) -> Option<(u32, u32, usize, &'a Item)> {
    for tab in tabs {
        for chest in &tab.chests {
            if let Some(index) = chest.items.iter().position(|i| i.uid == uid) {
                return Some((tab.id, chest.id, index, &chest.items[index]));
            }
        }
    }
    None
}

/// Locate a chest anywhere in the tree. Returns (owning tab id, chest).
pub fn find_chest(tabs: &[Tab], chest_id: u32) -> Option<(u32, &Chest)> {
    for tab in tabs {
        if let Some(chest) = tab.chest(chest_id) {
            return Some((tab.id, chest));
        }
    }
    None
}

pub fn tab_index(tabs: &[Tab], tab_id: u32) -> Option<usize> {
    tabs.iter().position(|t| t.id == tab_id)
}

/// Move one element, preserving the order of the rest. `to` is the index
/// the element lands on after removal, clamped to the valid range.
pub fn array_move<T>(mut v: Vec<T>, from: usize, to: usize) -> Vec<T> {
    let element = v.remove(from);
    let to = to.min(v.len());
    v.insert(to, element);
    v
}

/// True when no chest in the tree holds two items with the same variable.
pub fn duplicate_free(tabs: &[Tab]) -> bool {
    tabs.iter().flat_map(|t| t.chests.iter()).all(|chest| {
        chest
            .items
            .iter()
            .enumerate()
            .all(|(i, item)| !chest.items[..i].iter().any(|p| p.variable == item.variable))
    })
}
