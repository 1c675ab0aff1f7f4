//! Board Controller
//!
//! Owns the whole mutable state of one open profile: the tab tree, the
//! active tab, the selection, the history stacks, the id allocators, and
//! the in-flight gesture. Every command of the core's surface goes
//! through here; the tree is only ever replaced wholesale, so readers
//! always observe a consistent snapshot.

use crate::catalog::ItemCatalog;
use crate::domain::{Chest, Profile, Tab};
use crate::drag::{DragSource, DragState, DropTarget};
use crate::history::History;
use crate::ids::{IdAllocator, SequentialUidGenerator, UidGenerator};
use crate::resolver::{self, Resolution};
use crate::selection::Selection;
use crate::share::{self, StoredProfile};
use crate::tree;

/// Outcome of a removal request. Removing a populated chest or tab needs
/// explicit confirmation from the host before it happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed,
    ConfirmationRequired,
    /// The last remaining tab can never be removed.
    Rejected,
}

pub struct BoardController {
    catalog: ItemCatalog,
    uids: Box<dyn UidGenerator>,
    ids: IdAllocator,
    profile_name: String,
    tabs: Vec<Tab>,
    active_tab_id: u32,
    selection: Selection,
    history: History,
    drag: DragState,
}

impl BoardController {
    pub fn new(catalog: ItemCatalog) -> BoardController {
        BoardController::with_uid_generator(catalog, Box::new(SequentialUidGenerator::default()))
    }

    /// Construct with an injected uid source, so hosts and tests control
    /// placement uids.
    pub fn with_uid_generator(
        catalog: ItemCatalog,
        uids: Box<dyn UidGenerator>,
    ) -> BoardController {
        let profile = Profile::starter();
        let ids = IdAllocator::seed(&profile.tabs);
        let active_tab_id = profile.tabs[0].id;
        BoardController {
            catalog,
            uids,
            ids,
            profile_name: profile.name,
            tabs: profile.tabs,
            active_tab_id,
            selection: Selection::default(),
            history: History::default(),
            drag: DragState::default(),
        }
    }

    // ------------------------------------------------------------------
    // Read surface
    // ------------------------------------------------------------------

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active_tab_id(&self) -> u32 {
        self.active_tab_id
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == self.active_tab_id)
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn undo_available(&self) -> bool {
        self.history.undo_available()
    }

    pub fn redo_available(&self) -> bool {
        self.history.redo_available()
    }

    // ------------------------------------------------------------------
    // Selection and gestures
    // ------------------------------------------------------------------

    pub fn select(&mut self, uid: &str, extend: bool, is_final_click: bool) {
        self.selection.select(uid, extend, is_final_click);
    }

    pub fn begin_drag(&mut self, source: DragSource) {
        self.drag.begin(source);
    }

    /// Over event: transient hover state and the tab-switch timer only.
    pub fn drag_over(&mut self, target: Option<DropTarget>) {
        self.drag.over(target, self.active_tab_id);
    }

    /// Fire the deferred tab switch once the host's delay has elapsed.
    /// Not a structural change; no history entry.
    pub fn fire_tab_switch(&mut self) {
        if let Some(tab_id) = self.drag.tab_switch.fire() {
            if tree::tab_index(&self.tabs, tab_id).is_some() {
                self.active_tab_id = tab_id;
            }
        }
    }

    /// End the gesture. `None` means cancelled: no mutation, no history,
    /// selection untouched. Returns true when a placement committed.
    pub fn end_drag(&mut self, target: Option<DropTarget>) -> bool {
        let Some(source) = self.drag.end() else {
            return false;
        };
        let Some(target) = target else {
            return false;
        };
        let resolution = resolver::resolve(
            &source,
            &target,
            &self.tabs,
            self.active_tab_id,
            &self.selection,
            &self.catalog,
            &mut self.ids,
            self.uids.as_mut(),
        );
        match resolution {
            Some(resolution) => {
                if resolution.skipped > 0 {
                    log::info!("{} item(s) skipped by the target chest", resolution.skipped);
                }
                self.commit(resolution);
                true
            }
            None => false,
        }
    }

    fn commit(&mut self, resolution: Resolution) {
        self.history.record(&self.tabs);
        self.tabs = resolution.tabs;
        self.active_tab_id = resolution.active_tab_id;
        if resolution.clear_selection {
            self.selection.clear();
        }
    }

    // ------------------------------------------------------------------
    // Structural operations
    // ------------------------------------------------------------------

    /// Append a new tab with a single default chest and activate it.
    pub fn add_tab(&mut self) {
        self.history.record(&self.tabs);
        let tab_id = self.ids.next_tab_id();
        let mut tab = Tab::new(tab_id, &format!("Tab {}", tab_id));
        tab.chests.push(Chest::starter(self.ids.next_chest_id()));
        self.tabs.push(tab);
        self.active_tab_id = tab_id;
    }

    /// Remove a tab. The last tab is never removed; a tab whose chests
    /// hold items needs confirmation first.
    pub fn remove_tab(&mut self, tab_id: u32) -> Removal {
        if self.tabs.len() == 1 {
            return Removal::Rejected;
        }
        let Some(tab) = self.tabs.iter().find(|t| t.id == tab_id) else {
            return Removal::Rejected;
        };
        if !tab.has_no_items() {
            return Removal::ConfirmationRequired;
        }
        self.remove_tab_confirmed(tab_id)
    }

    /// Remove a tab after the host confirmed. Still refuses the last tab.
    pub fn remove_tab_confirmed(&mut self, tab_id: u32) -> Removal {
        if self.tabs.len() == 1 || tree::tab_index(&self.tabs, tab_id).is_none() {
            return Removal::Rejected;
        }
        self.history.record(&self.tabs);
        self.tabs.retain(|t| t.id != tab_id);
        if self.active_tab_id == tab_id {
            self.active_tab_id = self.tabs[0].id;
        }
        Removal::Removed
    }

    /// Append a plain chest to the active tab.
    pub fn add_chest(&mut self) {
        self.history.record(&self.tabs);
        let chest = Chest::barrel(self.ids.next_chest_id());
        let active = self.active_tab_id;
        if let Some(tab) = self.tabs.iter_mut().find(|t| t.id == active) {
            tab.chests.push(chest);
        }
    }

    /// Remove a chest. A chest holding items needs confirmation first.
    /// A tab may be left with zero chests; no default chest is recreated.
    pub fn remove_chest(&mut self, chest_id: u32) -> Removal {
        let Some((_, chest)) = tree::find_chest(&self.tabs, chest_id) else {
            return Removal::Rejected;
        };
        if !chest.items.is_empty() {
            return Removal::ConfirmationRequired;
        }
        self.remove_chest_confirmed(chest_id)
    }

    /// Remove a chest after the host confirmed.
    pub fn remove_chest_confirmed(&mut self, chest_id: u32) -> Removal {
        if tree::find_chest(&self.tabs, chest_id).is_none() {
            return Removal::Rejected;
        }
        self.history.record(&self.tabs);
        for tab in &mut self.tabs {
            tab.chests.retain(|c| c.id != chest_id);
        }
        Removal::Removed
    }

    /// Remove one placed item from a chest.
    pub fn remove_item_from_chest(&mut self, chest_id: u32, uid: &str) {
        if tree::find_item(&self.tabs, uid).map(|(_, owner, _, _)| owner) != Some(chest_id) {
            return;
        }
        self.history.record(&self.tabs);
        for tab in &mut self.tabs {
            for chest in &mut tab.chests {
                if chest.id == chest_id {
                    chest.items.retain(|i| i.uid != uid);
                }
            }
        }
    }

    /// Reorder tabs without a gesture: `tab_id` lands on `dest_tab_id`'s
    /// position.
    pub fn move_tab(&mut self, tab_id: u32, dest_tab_id: u32) -> bool {
        let resolution = resolver::resolve(
            &DragSource::Tab(tab_id),
            &DropTarget::Tab(dest_tab_id),
            &self.tabs,
            self.active_tab_id,
            &self.selection,
            &self.catalog,
            &mut self.ids,
            self.uids.as_mut(),
        );
        match resolution {
            Some(resolution) => {
                self.commit(resolution);
                true
            }
            None => false,
        }
    }

    pub fn set_active_tab(&mut self, tab_id: u32) {
        if tree::tab_index(&self.tabs, tab_id).is_some() {
            self.active_tab_id = tab_id;
        }
    }

    // ------------------------------------------------------------------
    // Cosmetic edits (outside history)
    // ------------------------------------------------------------------

    pub fn rename_profile(&mut self, name: &str) {
        self.profile_name = name.to_string();
    }

    pub fn rename_tab(&mut self, tab_id: u32, name: &str) {
        if let Some(tab) = self.tabs.iter_mut().find(|t| t.id == tab_id) {
            tab.name = name.to_string();
        }
    }

    pub fn rename_chest(&mut self, chest_id: u32, label: &str) {
        self.with_chest(chest_id, |chest| chest.label = label.to_string());
    }

    pub fn set_chest_icon(&mut self, chest_id: u32, icon: &str) {
        self.with_chest(chest_id, |chest| chest.icon = icon.to_string());
    }

    pub fn set_chest_checked(&mut self, chest_id: u32, checked: bool) {
        self.with_chest(chest_id, |chest| chest.checked = checked);
    }

    fn with_chest(&mut self, chest_id: u32, edit: impl FnOnce(&mut Chest)) {
        if let Some(chest) = self
            .tabs
            .iter_mut()
            .flat_map(|t| t.chests.iter_mut())
            .find(|c| c.id == chest_id)
        {
            edit(chest);
        }
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        let applied = self.history.undo(&mut self.tabs);
        if applied {
            self.after_tree_adopted();
        }
        applied
    }

    pub fn redo(&mut self) -> bool {
        let applied = self.history.redo(&mut self.tabs);
        if applied {
            self.after_tree_adopted();
        }
        applied
    }

    fn after_tree_adopted(&mut self) {
        // Adopted snapshots were not handed their ids by this allocator.
        self.ids.observe(&self.tabs);
        if tree::tab_index(&self.tabs, self.active_tab_id).is_none() {
            self.active_tab_id = self.tabs.first().map(|t| t.id).unwrap_or(1);
        }
    }

    // ------------------------------------------------------------------
    // Profiles
    // ------------------------------------------------------------------

    /// Reset to the fresh default profile.
    pub fn new_profile(&mut self) {
        self.history.record(&self.tabs);
        self.adopt_profile(Profile::starter());
    }

    /// Load a stored profile. Malformed payloads fall back to the fresh
    /// default profile rather than leaving the tree undefined.
    pub fn import_profile(&mut self, stored: &StoredProfile) {
        self.history.record(&self.tabs);
        let profile = match share::load_profile(stored, &self.catalog, self.uids.as_mut()) {
            Ok(profile) => profile,
            Err(e) => {
                log::warn!("profile load failed, starting fresh: {}", e);
                Profile::starter()
            }
        };
        self.adopt_profile(profile);
    }

    /// Decode and load a share code. Decode failures leave the current
    /// tree untouched.
    pub fn import_share_code(&mut self, code: &str) -> crate::domain::DomainResult<()> {
        let stored = share::decode_share_code(code)?;
        self.import_profile(&stored);
        Ok(())
    }

    pub fn export_profile(&self) -> StoredProfile {
        share::export_profile(&self.profile_name, &self.tabs)
    }

    pub fn share_code(&self) -> crate::domain::DomainResult<String> {
        share::share_code(&self.profile_name, &self.tabs)
    }

    fn adopt_profile(&mut self, profile: Profile) {
        self.profile_name = profile.name;
        self.tabs = profile.tabs;
        self.active_tab_id = self.tabs.first().map(|t| t.id).unwrap_or(1);
        self.ids.observe(&self.tabs);
        self.selection.clear();
    }
}
