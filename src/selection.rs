//! Selection Tracker
//!
//! Ordered multi-selection of placed item uids. Insertion order is
//! meaningful: a gathered batch moves in the order items were selected.

/// The transient set of item uids eligible to move together in the next
/// gesture. Not part of the profile; cleared on any committed move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    uids: Vec<String>,
}

impl Selection {
    pub fn contains(&self, uid: &str) -> bool {
        self.uids.iter().any(|u| u == uid)
    }

    pub fn len(&self) -> usize {
        self.uids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uids.is_empty()
    }

    /// Selected uids in insertion order.
    pub fn uids(&self) -> &[String] {
        &self.uids
    }

    pub fn clear(&mut self) {
        self.uids.clear();
    }

    /// Apply a click or press on `uid`.
    ///
    /// With the extend modifier held, membership toggles and nothing is
    /// ever cleared. Without it, an unselected target always becomes the
    /// sole selection immediately (a new gesture must not drag unrelated
    /// items). Pressing an already-selected member keeps the selection
    /// intact so the whole group can be dragged; only once the gesture
    /// resolves as a plain click (`is_final_click`) does the selection
    /// collapse to that member.
    pub fn select(&mut self, uid: &str, extend: bool, is_final_click: bool) {
        if extend {
            if let Some(pos) = self.uids.iter().position(|u| u == uid) {
                self.uids.remove(pos);
            } else {
                self.uids.push(uid.to_string());
            }
        } else if !self.contains(uid) || is_final_click {
            self.uids = vec![uid.to_string()];
        }
    }
}
