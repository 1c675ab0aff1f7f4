//! Drag Gesture State Machine
//!
//! One gesture is start, any number of over events, then exactly one end
//! or cancel, all on one logical thread. Over events never mutate the
//! tree: they only update transient hover state and the deferred
//! tab-switch timer. Only the end event commits, and a gesture must end
//! before the next can start.

/// What a gesture began on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// A placed item's uid, or a kind name for sidebar items.
    Item(String),
    Chest(u32),
    Tab(u32),
}

/// What the pointer is over when the gesture ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// A specific item; new items insert before it.
    Item(String),
    /// A chest body; new items append.
    Chest(u32),
    /// A tab header; items synthesize a new chest there, chests move there.
    Tab(u32),
    /// The "create new chest" zone of the active tab.
    NewChestZone,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging {
        source: DragSource,
        hover: Option<DropTarget>,
    },
}

/// Delay before a hovered tab is activated mid-gesture.
pub const TAB_SWITCH_DELAY_MS: u64 = 500;

/// Deferred activation of a tab hovered mid-gesture.
///
/// The core has no clock: the host fires the pending switch once
/// [`TAB_SWITCH_DELAY_MS`] has elapsed. Leaving the tab, ending the
/// gesture, or hovering the already-active tab cancels it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabSwitchTimer {
    pending: Option<u32>,
}

impl TabSwitchTimer {
    pub fn arm(&mut self, tab_id: u32, active_tab_id: u32) {
        self.pending = (tab_id != active_tab_id).then_some(tab_id);
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Take the pending switch once the host's delay has elapsed.
    pub fn fire(&mut self) -> Option<u32> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<u32> {
        self.pending
    }
}

/// The in-flight gesture, if any, plus its deferred tab switch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    phase: DragPhase,
    pub tab_switch: TabSwitchTimer,
}

impl DragState {
    pub fn begin(&mut self, source: DragSource) {
        self.phase = DragPhase::Dragging {
            source,
            hover: None,
        };
        self.tab_switch.cancel();
    }

    /// Record an over event. Hovering a tab arms the switch timer; any
    /// other target cancels it.
    pub fn over(&mut self, target: Option<DropTarget>, active_tab_id: u32) {
        if let DragPhase::Dragging { hover, .. } = &mut self.phase {
            match &target {
                Some(DropTarget::Tab(id)) => self.tab_switch.arm(*id, active_tab_id),
                _ => self.tab_switch.cancel(),
            }
            *hover = target;
        }
    }

    /// End or cancel the gesture, returning its source if one was in
    /// flight. Always transitions back to idle and clears the timer.
    pub fn end(&mut self) -> Option<DragSource> {
        self.tab_switch.cancel();
        match std::mem::take(&mut self.phase) {
            DragPhase::Dragging { source, .. } => Some(source),
            DragPhase::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    pub fn source(&self) -> Option<&DragSource> {
        match &self.phase {
            DragPhase::Dragging { source, .. } => Some(source),
            DragPhase::Idle => None,
        }
    }

    /// Current hover target, for transient highlighting only.
    pub fn hover(&self) -> Option<&DropTarget> {
        match &self.phase {
            DragPhase::Dragging { hover, .. } => hover.as_ref(),
            DragPhase::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gesture_runs_start_over_end() {
        let mut drag = DragState::default();
        assert!(!drag.is_dragging());

        drag.begin(DragSource::Item("u1".to_string()));
        assert!(drag.is_dragging());

        drag.over(Some(DropTarget::Chest(1)), 1);
        assert_eq!(drag.hover(), Some(&DropTarget::Chest(1)));

        assert_eq!(drag.end(), Some(DragSource::Item("u1".to_string())));
        assert!(!drag.is_dragging());
        assert_eq!(drag.end(), None);
    }

    #[test]
    fn hovering_a_tab_arms_the_switch_timer() {
        let mut drag = DragState::default();
        drag.begin(DragSource::Item("u1".to_string()));

        drag.over(Some(DropTarget::Tab(2)), 1);
        assert_eq!(drag.tab_switch.pending(), Some(2));

        // Moving off the tab cancels the pending switch.
        drag.over(Some(DropTarget::Chest(1)), 1);
        assert_eq!(drag.tab_switch.pending(), None);
    }

    #[test]
    fn hovering_the_active_tab_does_not_arm() {
        let mut drag = DragState::default();
        drag.begin(DragSource::Item("u1".to_string()));
        drag.over(Some(DropTarget::Tab(1)), 1);
        assert_eq!(drag.tab_switch.pending(), None);
    }

    #[test]
    fn ending_the_gesture_clears_the_timer() {
        let mut drag = DragState::default();
        drag.begin(DragSource::Item("u1".to_string()));
        drag.over(Some(DropTarget::Tab(2)), 1);
        drag.end();
        assert_eq!(drag.tab_switch.fire(), None);
    }

    #[test]
    fn fire_takes_the_pending_switch_once() {
        let mut timer = TabSwitchTimer::default();
        timer.arm(2, 1);
        assert_eq!(timer.fire(), Some(2));
        assert_eq!(timer.fire(), None);
    }
}
