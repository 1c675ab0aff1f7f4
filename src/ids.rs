//! Identifier Generation
//!
//! Placement uids come from an injectable generator so hosts and tests can
//! control them; chest and tab ids come from a high-water allocator so an
//! id is never reused within a session, even after its owner is deleted.

use crate::domain::Tab;

/// Source of unique placement uids for items cloned into chests.
pub trait UidGenerator {
    fn next_uid(&mut self) -> String;
}

/// Monotonic counter-based generator. Deterministic, so tests can predict
/// every uid it hands out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequentialUidGenerator {
    next: u64,
}

impl UidGenerator for SequentialUidGenerator {
    fn next_uid(&mut self) -> String {
        self.next += 1;
        format!("i{:06}", self.next)
    }
}

/// Allocates profile-global numeric ids for chests and tabs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdAllocator {
    chest_high: u32,
    tab_high: u32,
}

impl IdAllocator {
    /// Seed from an existing tree so fresh ids stay above everything in it.
    pub fn seed(tabs: &[Tab]) -> IdAllocator {
        let mut ids = IdAllocator::default();
        ids.observe(tabs);
        ids
    }

    /// Raise the high-water marks to cover `tabs`. Called after adopting a
    /// tree that this allocator did not hand the ids for (undo, import).
    pub fn observe(&mut self, tabs: &[Tab]) {
        for tab in tabs {
            self.tab_high = self.tab_high.max(tab.id);
            for chest in &tab.chests {
                self.chest_high = self.chest_high.max(chest.id);
            }
        }
    }

    pub fn next_chest_id(&mut self) -> u32 {
        self.chest_high += 1;
        self.chest_high
    }

    pub fn next_tab_id(&mut self) -> u32 {
        self.tab_high += 1;
        self.tab_high
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Chest, Tab};

    #[test]
    fn sequential_uids_are_deterministic() {
        let mut gen = SequentialUidGenerator::default();
        assert_eq!(gen.next_uid(), "i000001");
        assert_eq!(gen.next_uid(), "i000002");
    }

    #[test]
    fn allocator_seeds_above_existing_ids() {
        let mut tab = Tab::new(3, "T");
        tab.chests.push(Chest::barrel(7));
        let mut ids = IdAllocator::seed(&[tab]);
        assert_eq!(ids.next_chest_id(), 8);
        assert_eq!(ids.next_tab_id(), 4);
    }

    #[test]
    fn ids_are_not_reused_after_deletion() {
        let mut tab = Tab::new(1, "T");
        tab.chests.push(Chest::barrel(1));
        tab.chests.push(Chest::barrel(2));
        let mut ids = IdAllocator::seed(&[tab.clone()]);

        // Deleting chest 2 does not free its id.
        tab.chests.retain(|c| c.id != 2);
        ids.observe(&[tab]);
        assert_eq!(ids.next_chest_id(), 3);
    }
}
