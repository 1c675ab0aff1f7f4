//! Placement Resolver
//!
//! Interprets the end of a drag gesture and computes the next consistent
//! tab tree. Pure over its inputs apart from id/uid allocation: the caller
//! owns the history push, the selection clear, and the commit itself, so
//! readers only ever observe a fully built replacement tree.

use std::collections::HashSet;

use crate::catalog::ItemCatalog;
use crate::domain::{Chest, Item, Tab};
use crate::drag::{DragSource, DropTarget};
use crate::ids::{IdAllocator, UidGenerator};
use crate::selection::Selection;
use crate::tree;

/// A computed placement: the replacement tree plus commit side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub tabs: Vec<Tab>,
    pub active_tab_id: u32,
    /// True after item placement; chest and tab moves leave the selection.
    pub clear_selection: bool,
    /// Gathered items the target chest refused (duplicate variable or
    /// command budget). Informational; the rest of the batch landed.
    pub skipped: usize,
}

/// Where a gathered item came from: a chest in the tree, or the sidebar
/// source list (`source_chest` is `None`).
#[derive(Debug, Clone)]
struct Gathered {
    item: Item,
    source_chest: Option<u32>,
}

/// Resolve a drag-end event into the next tree, or `None` for a no-op
/// (unresolvable target, or source equals destination with no position
/// change).
#[allow(clippy::too_many_arguments)]
pub fn resolve(
    source: &DragSource,
    target: &DropTarget,
    tabs: &[Tab],
    active_tab_id: u32,
    selection: &Selection,
    catalog: &ItemCatalog,
    ids: &mut IdAllocator,
    uids: &mut dyn UidGenerator,
) -> Option<Resolution> {
    match source {
        DragSource::Tab(tab_id) => resolve_tab_move(*tab_id, target, tabs, active_tab_id),
        DragSource::Chest(chest_id) => resolve_chest_move(*chest_id, target, tabs, active_tab_id),
        DragSource::Item(uid) => {
            resolve_item_drop(uid, target, tabs, active_tab_id, selection, catalog, ids, uids)
        }
    }
}

/// Reorder the tab sequence: the source tab lands on the target tab's
/// position.
fn resolve_tab_move(
    tab_id: u32,
    target: &DropTarget,
    tabs: &[Tab],
    active_tab_id: u32,
) -> Option<Resolution> {
    let DropTarget::Tab(dest_id) = target else {
        return None;
    };
    if *dest_id == tab_id {
        return None;
    }
    let from = tree::tab_index(tabs, tab_id)?;
    let to = tree::tab_index(tabs, *dest_id)?;
    Some(Resolution {
        tabs: tree::array_move(tabs.to_vec(), from, to),
        active_tab_id,
        clear_selection: false,
        skipped: 0,
    })
}

/// Reorder a chest within its tab, or move it wholesale to another tab.
fn resolve_chest_move(
    chest_id: u32,
    target: &DropTarget,
    tabs: &[Tab],
    active_tab_id: u32,
) -> Option<Resolution> {
    let (source_tab_id, _) = tree::find_chest(tabs, chest_id)?;

    match target {
        DropTarget::Chest(dest_id) if *dest_id != chest_id => {
            let (dest_tab_id, _) = tree::find_chest(tabs, *dest_id)?;
            if dest_tab_id == source_tab_id {
                reorder_chests(chest_id, *dest_id, source_tab_id, tabs, active_tab_id)
            } else {
                let dest_tab = tabs.iter().find(|t| t.id == dest_tab_id)?;
                let at = dest_tab.chests.iter().position(|c| c.id == *dest_id)?;
                retab_chest(chest_id, source_tab_id, dest_tab_id, Some(at), tabs)
            }
        }
        DropTarget::Tab(dest_tab_id) if *dest_tab_id != source_tab_id => {
            tree::tab_index(tabs, *dest_tab_id)?;
            retab_chest(chest_id, source_tab_id, *dest_tab_id, None, tabs)
        }
        // Chests cannot be dropped into items or the new-chest zone.
        _ => None,
    }
}

fn reorder_chests(
    chest_id: u32,
    dest_id: u32,
    tab_id: u32,
    tabs: &[Tab],
    active_tab_id: u32,
) -> Option<Resolution> {
    let tab = tabs.iter().find(|t| t.id == tab_id)?;
    let from = tab.chests.iter().position(|c| c.id == chest_id)?;
    let to = tab.chests.iter().position(|c| c.id == dest_id)?;

    let tabs = tabs
        .iter()
        .map(|t| {
            if t.id == tab_id {
                Tab {
                    chests: tree::array_move(t.chests.clone(), from, to),
                    ..t.clone()
                }
            } else {
                t.clone()
            }
        })
        .collect();
    Some(Resolution {
        tabs,
        active_tab_id,
        clear_selection: false,
        skipped: 0,
    })
}

/// Remove the chest from its tab and insert it into the destination tab,
/// at `at` if given, appended otherwise. Activates the destination tab.
fn retab_chest(
    chest_id: u32,
    source_tab_id: u32,
    dest_tab_id: u32,
    at: Option<usize>,
    tabs: &[Tab],
) -> Option<Resolution> {
    let (_, chest) = tree::find_chest(tabs, chest_id)?;
    let moved = chest.clone();

    let tabs = tabs
        .iter()
        .map(|t| {
            if t.id == source_tab_id {
                Tab {
                    chests: t.chests.iter().filter(|c| c.id != chest_id).cloned().collect(),
                    ..t.clone()
                }
            } else if t.id == dest_tab_id {
                let mut chests = t.chests.clone();
                let at = at.map(|i| i.min(chests.len())).unwrap_or(chests.len());
                chests.insert(at, moved.clone());
                Tab {
                    chests,
                    ..t.clone()
                }
            } else {
                t.clone()
            }
        })
        .collect();
    Some(Resolution {
        tabs,
        active_tab_id: dest_tab_id,
        clear_selection: false,
        skipped: 0,
    })
}

#[allow(clippy::too_many_arguments)]
fn resolve_item_drop(
    source_uid: &str,
    target: &DropTarget,
    tabs: &[Tab],
    active_tab_id: u32,
    selection: &Selection,
    catalog: &ItemCatalog,
    ids: &mut IdAllocator,
    uids: &mut dyn UidGenerator,
) -> Option<Resolution> {
    let batch = gather(source_uid, tabs, selection, catalog);
    if batch.is_empty() {
        return None;
    }

    match target {
        DropTarget::NewChestZone => {
            synthesize_chest(&batch, tabs, active_tab_id, active_tab_id, ids, uids)
        }
        DropTarget::Tab(tab_id) => {
            tree::tab_index(tabs, *tab_id)?;
            synthesize_chest(&batch, tabs, *tab_id, *tab_id, ids, uids)
        }
        DropTarget::Chest(chest_id) => {
            let (_, chest) = tree::find_chest(tabs, *chest_id)?;
            place(&batch, *chest_id, chest.items.len(), tabs, active_tab_id, uids)
        }
        DropTarget::Item(over_uid) => {
            let (_, chest_id, index, _) = tree::find_item(tabs, over_uid)?;
            place(&batch, chest_id, index, tabs, active_tab_id, uids)
        }
    }
}

/// Gather the effective batch for a gesture: the whole selection (in
/// insertion order) when the source is part of a multi-selection,
/// otherwise just the source. Duplicate variables within the batch are
/// dropped up front; first occurrence wins.
fn gather(
    source_uid: &str,
    tabs: &[Tab],
    selection: &Selection,
    catalog: &ItemCatalog,
) -> Vec<Gathered> {
    let uids: Vec<&str> = if selection.contains(source_uid) && selection.len() > 1 {
        selection.uids().iter().map(String::as_str).collect()
    } else {
        vec![source_uid]
    };

    let mut batch = Vec::new();
    for uid in uids {
        if let Some((_, chest_id, _, item)) = tree::find_item(tabs, uid) {
            batch.push(Gathered {
                item: item.clone(),
                source_chest: Some(chest_id),
            });
        } else if let Some(item) = catalog.sidebar_item(uid) {
            batch.push(Gathered {
                item,
                source_chest: None,
            });
        }
    }

    let mut seen = HashSet::new();
    batch.retain(|g| seen.insert(g.item.variable.clone()));
    batch
}

/// Drop onto a tab or the new-chest zone: the whole batch becomes a fresh
/// chest, named and themed after the first gathered item. Chest-resident
/// items move; sidebar items are cloned with fresh uids.
fn synthesize_chest(
    batch: &[Gathered],
    tabs: &[Tab],
    target_tab_id: u32,
    active_tab_id: u32,
    ids: &mut IdAllocator,
    uids: &mut dyn UidGenerator,
) -> Option<Resolution> {
    let first = &batch.first()?.item;
    let mut chest = Chest::new(ids.next_chest_id(), &first.display_name(), &first.item);

    let mut removed: HashSet<String> = HashSet::new();
    for g in batch {
        match g.source_chest {
            None => chest.items.push(g.item.with_uid(uids.next_uid())),
            Some(_) => {
                removed.insert(g.item.uid.clone());
                chest.items.push(g.item.clone());
            }
        }
    }

    let tabs = tabs
        .iter()
        .map(|t| {
            let mut chests: Vec<Chest> = t
                .chests
                .iter()
                .map(|c| Chest {
                    items: c.items.iter().filter(|i| !removed.contains(&i.uid)).cloned().collect(),
                    ..c.clone()
                })
                .collect();
            if t.id == target_tab_id {
                chests.push(chest.clone());
            }
            Tab {
                chests,
                ..t.clone()
            }
        })
        .collect();

    log::debug!(
        "synthesized chest {} with {} item(s) in tab {}",
        chest.id,
        chest.items.len(),
        target_tab_id
    );
    Some(Resolution {
        tabs,
        active_tab_id,
        clear_selection: true,
        skipped: 0,
    })
}

/// Drop into an existing chest at `target_index`.
fn place(
    batch: &[Gathered],
    target_chest_id: u32,
    target_index: usize,
    tabs: &[Tab],
    active_tab_id: u32,
    uids: &mut dyn UidGenerator,
) -> Option<Resolution> {
    let (_, target_chest) = tree::find_chest(tabs, target_chest_id)?;
    let target_chest = target_chest.clone();

    // A single item dropped back into its own chest is a plain reorder:
    // no clone, no duplicate re-check.
    if let [only] = batch {
        if only.source_chest == Some(target_chest_id) {
            return reorder_within_chest(
                &only.item,
                &target_chest,
                target_index,
                tabs,
                active_tab_id,
            );
        }
    }

    // Simulate insertions against a working copy so each item's duplicate
    // check sees the prior items from the same batch.
    let mut working = target_chest.items.clone();
    let mut accepted: Vec<Item> = Vec::new();
    let mut removed: HashSet<String> = HashSet::new();
    let mut skipped = 0;

    for g in batch {
        if g.source_chest == Some(target_chest_id) {
            working.retain(|i| i.uid != g.item.uid);
        }
        let candidate = match g.source_chest {
            None => g.item.with_uid(uids.next_uid()),
            Some(_) => g.item.clone(),
        };
        let probe = Chest {
            items: working,
            ..target_chest.clone()
        };
        match probe.insert(&candidate, None) {
            Ok(items) => {
                working = items;
                if g.source_chest.is_some() {
                    removed.insert(g.item.uid.clone());
                }
                accepted.push(candidate);
            }
            Err(reason) => {
                working = probe.items;
                skipped += 1;
                log::debug!("skipped {} for chest {}: {}", g.item.item, target_chest_id, reason);
            }
        }
    }

    // One commit: every prior owner loses its moved items, the target
    // gains the accepted ones at the resolved index.
    let tabs = tabs
        .iter()
        .map(|t| Tab {
            chests: t
                .chests
                .iter()
                .map(|c| {
                    let mut items: Vec<Item> = c
                        .items
                        .iter()
                        .filter(|i| !removed.contains(&i.uid))
                        .cloned()
                        .collect();
                    if c.id == target_chest_id {
                        let at = target_index.min(items.len());
                        items.splice(at..at, accepted.iter().cloned());
                    }
                    Chest {
                        items,
                        ..c.clone()
                    }
                })
                .collect(),
            ..t.clone()
        })
        .collect();

    Some(Resolution {
        tabs,
        active_tab_id,
        clear_selection: true,
        skipped,
    })
}

fn reorder_within_chest(
    item: &Item,
    chest: &Chest,
    target_index: usize,
    tabs: &[Tab],
    active_tab_id: u32,
) -> Option<Resolution> {
    let from = chest.items.iter().position(|i| i.uid == item.uid)?;
    if from == target_index {
        return None;
    }
    let items = tree::array_move(chest.items.clone(), from, target_index);

    let tabs = tabs
        .iter()
        .map(|t| Tab {
            chests: t
                .chests
                .iter()
                .map(|c| {
                    if c.id == chest.id {
                        Chest {
                            items: items.clone(),
                            ..c.clone()
                        }
                    } else {
                        c.clone()
                    }
                })
                .collect(),
            ..t.clone()
        })
        .collect();

    Some(Resolution {
        tabs,
        active_tab_id,
        clear_selection: true,
        skipped: 0,
    })
}
