//! End-to-end scenarios driven through the controller's command surface.

use crate::catalog::{ItemCatalog, ItemKind};
use crate::controller::{BoardController, Removal};
use crate::domain::Chest;
use crate::drag::{DragSource, DropTarget};
use crate::tree;

fn kind(name: &str, variable: &str) -> ItemKind {
    ItemKind {
        item: name.to_string(),
        variable: variable.to_string(),
        image: format!("{}.png", name),
    }
}

fn catalog() -> ItemCatalog {
    ItemCatalog::new(vec![
        kind("alpha", "a"),
        kind("bravo", "b"),
        kind("charlie", "c"),
        kind("iron_sword", "is"),
        kind("long_pole", &"v".repeat(244)),
    ])
}

fn board() -> BoardController {
    BoardController::new(catalog())
}

/// Drag `source_uid` and drop it on `target` in one gesture.
fn drop_item(board: &mut BoardController, source_uid: &str, target: DropTarget) -> bool {
    board.begin_drag(DragSource::Item(source_uid.to_string()));
    board.end_drag(Some(target))
}

fn chest(board: &BoardController, chest_id: u32) -> Chest {
    tree::find_chest(board.tabs(), chest_id)
        .map(|(_, c)| c.clone())
        .expect("chest not found")
}

fn vars(board: &BoardController, chest_id: u32) -> Vec<String> {
    chest(board, chest_id)
        .items
        .iter()
        .map(|i| i.variable.clone())
        .collect()
}

fn uid_at(board: &BoardController, chest_id: u32, index: usize) -> String {
    chest(board, chest_id).items[index].uid.clone()
}

#[test]
fn sidebar_drop_clones_with_fresh_uid() {
    let mut board = board();
    assert!(drop_item(&mut board, "alpha", DropTarget::Chest(1)));
    let placed = chest(&board, 1).items[0].clone();
    assert_eq!(placed.item, "alpha");
    assert_ne!(placed.uid, "alpha");

    board.add_chest();
    assert!(drop_item(&mut board, "alpha", DropTarget::Chest(2)));
    assert_ne!(uid_at(&board, 2, 0), placed.uid);
}

#[test]
fn duplicate_sidebar_drop_is_skipped() {
    // Scenario: chest holds a and b; dropping another b changes nothing.
    let mut board = board();
    drop_item(&mut board, "alpha", DropTarget::Chest(1));
    drop_item(&mut board, "bravo", DropTarget::Chest(1));
    assert_eq!(vars(&board, 1), ["a", "b"]);

    drop_item(&mut board, "bravo", DropTarget::Chest(1));
    assert_eq!(vars(&board, 1), ["a", "b"]);

    // The commit still records history; popping it restores the
    // identical state.
    assert!(board.undo());
    assert_eq!(vars(&board, 1), ["a", "b"]);
    assert!(tree::duplicate_free(board.tabs()));
}

#[test]
fn multi_selection_onto_new_chest_zone_builds_a_chest() {
    // Scenario: C1=[a], C2=[b]; both items dragged to the create zone.
    let mut board = board();
    drop_item(&mut board, "alpha", DropTarget::Chest(1));
    board.add_chest();
    drop_item(&mut board, "bravo", DropTarget::Chest(2));

    let uid_a = uid_at(&board, 1, 0);
    let uid_b = uid_at(&board, 2, 0);
    board.select(&uid_a, false, false);
    board.select(&uid_b, true, false);

    assert!(drop_item(&mut board, &uid_a, DropTarget::NewChestZone));

    let built = chest(&board, 3);
    assert_eq!(built.label, "alpha");
    assert_eq!(built.icon, "alpha");
    let built_vars: Vec<&str> = built.items.iter().map(|i| i.variable.as_str()).collect();
    assert_eq!(built_vars, ["a", "b"]);
    // Moved, not copied: the same uids travelled.
    assert_eq!(built.items[0].uid, uid_a);
    assert!(chest(&board, 1).items.is_empty());
    assert!(chest(&board, 2).items.is_empty());
    assert!(board.selection().is_empty());

    // One history push for the whole move.
    assert!(board.undo());
    assert_eq!(vars(&board, 1), ["a"]);
    assert_eq!(vars(&board, 2), ["b"]);
    assert!(tree::find_chest(board.tabs(), 3).is_none());
}

#[test]
fn dropping_on_an_item_inserts_before_it() {
    // Scenario: [a, b, c]; dragging c before a yields [c, a, b].
    let mut board = board();
    drop_item(&mut board, "alpha", DropTarget::Chest(1));
    drop_item(&mut board, "bravo", DropTarget::Chest(1));
    drop_item(&mut board, "charlie", DropTarget::Chest(1));

    let uid_a = uid_at(&board, 1, 0);
    let uid_c = uid_at(&board, 1, 2);
    let before: Vec<String> = chest(&board, 1).items.iter().map(|i| i.uid.clone()).collect();

    assert!(drop_item(&mut board, &uid_c, DropTarget::Item(uid_a.clone())));
    assert_eq!(vars(&board, 1), ["c", "a", "b"]);
    // Same chest, same placements, just reordered.
    let after: Vec<String> = chest(&board, 1).items.iter().map(|i| i.uid.clone()).collect();
    assert_eq!(after, [before[2].clone(), before[0].clone(), before[1].clone()]);

    assert!(board.undo());
    assert_eq!(vars(&board, 1), ["a", "b", "c"]);
}

#[test]
fn dropping_an_item_on_itself_is_a_no_op() {
    let mut board = board();
    drop_item(&mut board, "alpha", DropTarget::Chest(1));
    let uid_a = uid_at(&board, 1, 0);
    let undo_was_available = board.undo_available();

    assert!(!drop_item(&mut board, &uid_a, DropTarget::Item(uid_a.clone())));
    assert_eq!(board.undo_available(), undo_was_available);
}

#[test]
fn cross_chest_batch_skips_duplicates_atomically() {
    // C1=[a, b]; C2=[c, b]. Dragging C2's items onto C1 moves c and
    // skips the duplicate b, which stays where it was.
    let mut board = board();
    drop_item(&mut board, "alpha", DropTarget::Chest(1));
    drop_item(&mut board, "bravo", DropTarget::Chest(1));
    board.add_chest();
    drop_item(&mut board, "charlie", DropTarget::Chest(2));
    drop_item(&mut board, "bravo", DropTarget::Chest(2));

    let uid_c = uid_at(&board, 2, 0);
    let uid_b2 = uid_at(&board, 2, 1);
    board.select(&uid_c, false, false);
    board.select(&uid_b2, true, false);

    assert!(drop_item(&mut board, &uid_c, DropTarget::Chest(1)));
    assert_eq!(vars(&board, 1), ["a", "b", "c"]);
    assert_eq!(vars(&board, 2), ["b"]);
    assert!(board.selection().is_empty());
    assert!(tree::duplicate_free(board.tabs()));
}

#[test]
fn batch_duplicates_resolve_first_occurrence_wins() {
    // The same variable picked up twice in one gesture lands once.
    let mut board = board();
    drop_item(&mut board, "bravo", DropTarget::Chest(1));
    board.add_chest();
    drop_item(&mut board, "bravo", DropTarget::Chest(2));

    let first = uid_at(&board, 1, 0);
    let second = uid_at(&board, 2, 0);
    board.select(&first, false, false);
    board.select(&second, true, false);

    assert!(drop_item(&mut board, &first, DropTarget::NewChestZone));
    let built = chest(&board, 3);
    assert_eq!(built.items.len(), 1);
    assert_eq!(built.items[0].uid, first);
    // The later duplicate never moved.
    assert_eq!(uid_at(&board, 2, 0), second);
}

#[test]
fn command_budget_blocks_insertion() {
    let mut board = board();
    drop_item(&mut board, "long_pole", DropTarget::Chest(1));
    assert_eq!(chest(&board, 1).command().len(), 256);

    // One more variable would push the command over the limit.
    drop_item(&mut board, "alpha", DropTarget::Chest(1));
    assert_eq!(chest(&board, 1).items.len(), 1);
}

#[test]
fn dropping_on_a_tab_builds_the_chest_there_and_activates_it() {
    let mut board = board();
    drop_item(&mut board, "alpha", DropTarget::Chest(1));
    board.add_tab();
    board.set_active_tab(1);

    let uid_a = uid_at(&board, 1, 0);
    assert!(drop_item(&mut board, &uid_a, DropTarget::Tab(2)));
    assert_eq!(board.active_tab_id(), 2);
    assert!(chest(&board, 1).items.is_empty());

    let tab2 = board.tabs().iter().find(|t| t.id == 2).unwrap();
    let built = tab2.chests.last().unwrap();
    assert_eq!(built.label, "alpha");
    assert_eq!(built.items.len(), 1);
}

#[test]
fn underscored_kind_names_display_with_spaces() {
    let mut board = board();
    assert!(drop_item(&mut board, "iron_sword", DropTarget::NewChestZone));
    let built = chest(&board, 2);
    assert_eq!(built.label, "iron sword");
    assert_eq!(built.icon, "iron_sword");
}

#[test]
fn chest_moves_between_tabs() {
    let mut board = board();
    drop_item(&mut board, "alpha", DropTarget::Chest(1));
    board.add_tab();
    board.set_active_tab(1);

    board.begin_drag(DragSource::Chest(1));
    assert!(board.end_drag(Some(DropTarget::Tab(2))));

    assert_eq!(board.active_tab_id(), 2);
    let (owner, moved) = tree::find_chest(board.tabs(), 1).unwrap();
    assert_eq!(owner, 2);
    assert_eq!(moved.items.len(), 1);
    let tab1 = board.tabs().iter().find(|t| t.id == 1).unwrap();
    assert!(tab1.chests.is_empty());
}

#[test]
fn chest_dropped_on_a_chest_in_another_tab_takes_its_position() {
    let mut board = board();
    board.add_tab(); // tab 2, chest 2
    board.set_active_tab(1);

    board.begin_drag(DragSource::Chest(1));
    assert!(board.end_drag(Some(DropTarget::Chest(2))));

    let tab2 = board.tabs().iter().find(|t| t.id == 2).unwrap();
    let ids: Vec<u32> = tab2.chests.iter().map(|c| c.id).collect();
    // Inserted at the target chest's index.
    assert_eq!(ids, [1, 2]);
}

#[test]
fn chests_reorder_within_a_tab() {
    let mut board = board();
    board.add_chest(); // 2
    board.add_chest(); // 3

    board.begin_drag(DragSource::Chest(3));
    assert!(board.end_drag(Some(DropTarget::Chest(1))));
    let ids: Vec<u32> = board.active_tab().unwrap().chests.iter().map(|c| c.id).collect();
    assert_eq!(ids, [3, 1, 2]);

    assert!(board.undo());
    let ids: Vec<u32> = board.active_tab().unwrap().chests.iter().map(|c| c.id).collect();
    assert_eq!(ids, [1, 2, 3]);
}

#[test]
fn tabs_reorder_by_gesture() {
    let mut board = board();
    board.add_tab();
    board.add_tab();

    board.begin_drag(DragSource::Tab(3));
    assert!(board.end_drag(Some(DropTarget::Tab(1))));
    let ids: Vec<u32> = board.tabs().iter().map(|t| t.id).collect();
    assert_eq!(ids, [3, 1, 2]);
}

#[test]
fn cancelled_gesture_mutates_nothing() {
    let mut board = board();
    drop_item(&mut board, "alpha", DropTarget::Chest(1));
    let before = board.tabs().to_vec();
    let undo_was_available = board.undo_available();

    let uid_a = uid_at(&board, 1, 0);
    board.select(&uid_a, false, false);
    board.begin_drag(DragSource::Item(uid_a));
    assert!(!board.end_drag(None));

    assert_eq!(board.tabs(), &before[..]);
    assert_eq!(board.undo_available(), undo_was_available);
    assert!(!board.selection().is_empty());
}

#[test]
fn hovering_a_tab_switches_after_the_delay() {
    let mut board = board();
    board.add_tab();
    assert_eq!(board.active_tab_id(), 2);

    board.begin_drag(DragSource::Item("alpha".to_string()));
    board.drag_over(Some(DropTarget::Tab(1)));
    assert_eq!(board.drag().tab_switch.pending(), Some(1));

    board.fire_tab_switch();
    assert_eq!(board.active_tab_id(), 1);
    // Switching tabs mid-gesture is not a structural change.
    board.end_drag(None);
    assert!(board.undo_available()); // only the add_tab push
    board.undo();
    assert!(!board.undo_available());
}

#[test]
fn last_tab_and_empty_chest_removal_rules() {
    // Scenario: one tab, one empty chest.
    let mut board = board();
    assert_eq!(board.remove_chest(1), Removal::Removed);
    assert!(board.active_tab().unwrap().chests.is_empty());

    // The last tab survives, even empty.
    assert_eq!(board.remove_tab(1), Removal::Rejected);
    assert_eq!(board.tabs().len(), 1);
}

#[test]
fn populated_removals_need_confirmation() {
    let mut board = board();
    drop_item(&mut board, "alpha", DropTarget::Chest(1));
    assert_eq!(board.remove_chest(1), Removal::ConfirmationRequired);
    assert_eq!(chest(&board, 1).items.len(), 1);
    assert_eq!(board.remove_chest_confirmed(1), Removal::Removed);

    board.add_tab();
    drop_item(&mut board, "bravo", DropTarget::Chest(2));
    assert_eq!(board.remove_tab(2), Removal::ConfirmationRequired);
    assert_eq!(board.remove_tab_confirmed(2), Removal::Removed);
    assert_eq!(board.active_tab_id(), 1);
}

#[test]
fn chest_ids_are_profile_global_and_never_reused() {
    let mut board = board();
    board.add_tab(); // tab 2, chest 2
    board.add_chest(); // chest 3, in tab 2
    let ids: Vec<u32> = board
        .tabs()
        .iter()
        .flat_map(|t| t.chests.iter().map(|c| c.id))
        .collect();
    assert_eq!(ids, [1, 2, 3]);

    assert_eq!(board.remove_chest(3), Removal::Removed);
    board.add_chest();
    let newest = board.active_tab().unwrap().chests.last().unwrap().id;
    assert_eq!(newest, 4);
}

#[test]
fn undo_redo_round_trip_is_exact() {
    let mut board = board();
    drop_item(&mut board, "alpha", DropTarget::Chest(1));
    drop_item(&mut board, "bravo", DropTarget::Chest(1));
    let committed = board.tabs().to_vec();

    assert!(board.undo());
    assert!(board.redo());
    assert_eq!(board.tabs(), &committed[..]);

    assert!(board.undo());
    assert_eq!(vars(&board, 1), ["a"]);
}

#[test]
fn export_import_round_trip_via_controller() {
    let mut board = board();
    drop_item(&mut board, "alpha", DropTarget::Chest(1));
    board.rename_chest(1, "Favorites");
    board.rename_profile("Mine");
    board.add_tab();

    let exported = board.export_profile();
    let mut other = self::board();
    other.import_profile(&exported);

    assert_eq!(other.profile_name(), "Mine");
    assert_eq!(other.tabs().len(), 2);
    assert_eq!(other.tabs()[0].chests[0].label, "Favorites");
    assert_eq!(vars(&other, 1), ["a"]);
    assert_eq!(other.active_tab_id(), other.tabs()[0].id);
}

#[test]
fn share_code_round_trip_via_controller() {
    let mut board = board();
    drop_item(&mut board, "alpha", DropTarget::Chest(1));
    drop_item(&mut board, "bravo", DropTarget::Chest(1));
    board.rename_profile("Shared");

    let code = board.share_code().unwrap();
    let mut other = self::board();
    other.import_share_code(&code).unwrap();

    assert_eq!(other.profile_name(), "Shared");
    // Variables travel as kind names and come back from the catalog.
    assert_eq!(vars(&other, 1), ["a", "b"]);
}

#[test]
fn bad_share_code_leaves_the_tree_alone() {
    let mut board = board();
    drop_item(&mut board, "alpha", DropTarget::Chest(1));
    let before = board.tabs().to_vec();

    assert!(board.import_share_code("garbage!").is_err());
    assert_eq!(board.tabs(), &before[..]);
}

#[test]
fn malformed_import_falls_back_to_default_profile() {
    let mut board = board();
    drop_item(&mut board, "alpha", DropTarget::Chest(1));

    board.import_profile(&crate::share::StoredProfile::default());
    assert_eq!(board.tabs().len(), 1);
    assert_eq!(board.tabs()[0].chests.len(), 1);
    assert!(board.tabs()[0].chests[0].items.is_empty());

    // The previous profile is one undo away.
    assert!(board.undo());
    assert_eq!(vars(&board, 1), ["a"]);
}

#[test]
fn remove_item_from_chest_is_undoable() {
    let mut board = board();
    drop_item(&mut board, "alpha", DropTarget::Chest(1));
    drop_item(&mut board, "bravo", DropTarget::Chest(1));
    let uid_a = uid_at(&board, 1, 0);

    board.remove_item_from_chest(1, &uid_a);
    assert_eq!(vars(&board, 1), ["b"]);
    assert!(board.undo());
    assert_eq!(vars(&board, 1), ["a", "b"]);
}

#[test]
fn cosmetic_edits_stay_out_of_history() {
    let mut board = board();
    board.rename_chest(1, "Renamed");
    board.set_chest_icon(1, "compass");
    board.set_chest_checked(1, true);
    board.rename_tab(1, "Main");
    assert!(!board.undo_available());

    let c = chest(&board, 1);
    assert_eq!(c.label, "Renamed");
    assert_eq!(c.icon, "compass");
    assert!(c.checked);
}
