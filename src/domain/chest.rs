//! Chest Entity and Container Rules
//!
//! A chest is an ordered, duplicate-free (by variable) container of items.
//! This module is also the single source of truth for the chest command
//! string and its length budget.

use serde::{Deserialize, Serialize};

use super::item::Item;

/// Fixed prefix of the generated chest command.
pub const COMMAND_PREFIX: &str = "/signedit 3 ";

/// Hard limit on the generated command length.
pub const COMMAND_LIMIT: usize = 256;

/// An ordered container of items, grouped under a tab.
///
/// `id` is unique across the whole profile, not per tab; cross-tab chest
/// moves rely on that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chest {
    pub id: u32,
    pub label: String,
    pub icon: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Chest {
    pub fn new(id: u32, label: &str, icon: &str) -> Chest {
        Chest {
            id,
            label: label.to_string(),
            icon: icon.to_string(),
            checked: false,
            items: Vec::new(),
        }
    }

    /// Plain chest appended by the "add chest" action.
    pub fn barrel(id: u32) -> Chest {
        Chest::new(id, "Barrel", "barrel")
    }

    /// Default chest seeded into fresh tabs and fresh profiles.
    pub fn starter(id: u32) -> Chest {
        Chest::new(id, "My first chest", "barrel")
    }

    /// True if any existing item shares `item`'s variable.
    pub fn has_variable(&self, item: &Item) -> bool {
        self.items.iter().any(|i| i.variable == item.variable)
    }

    /// No duplicates allowed in the same chest.
    pub fn can_insert(&self, item: &Item) -> bool {
        !self.has_variable(item)
    }

    /// Returns the item list with `item` inserted at `at` (clamped), or
    /// appended when `at` is `None`.
    ///
    /// Refusals are reported results, never faults: the caller decides
    /// whether to skip, warn, or block. An insertion is refused if the
    /// variable is already present, or if the resulting command would
    /// exceed [`COMMAND_LIMIT`].
    pub fn insert(&self, item: &Item, at: Option<usize>) -> Result<Vec<Item>, InsertError> {
        if self.has_variable(item) {
            return Err(InsertError::Duplicate);
        }
        let mut items = self.items.clone();
        let at = at.map(|i| i.min(items.len())).unwrap_or(items.len());
        items.insert(at, item.clone());
        if build_command(&items).len() > COMMAND_LIMIT {
            return Err(InsertError::CommandTooLong);
        }
        Ok(items)
    }

    /// Command string for this chest's current items.
    pub fn command(&self) -> String {
        build_command(&self.items)
    }

    pub fn budget(&self) -> CommandBudget {
        command_budget(&self.items)
    }
}

/// Why an insertion was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    /// The chest already holds this variable.
    Duplicate,
    /// The resulting command would exceed [`COMMAND_LIMIT`].
    CommandTooLong,
}

impl std::fmt::Display for InsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsertError::Duplicate => write!(f, "item variable already in chest"),
            InsertError::CommandTooLong => write!(f, "command would exceed {} characters", COMMAND_LIMIT),
        }
    }
}

impl std::error::Error for InsertError {}

/// Empty string for no items, otherwise the prefix followed by the
/// comma-joined variables in item order.
pub fn build_command(items: &[Item]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let vars: Vec<&str> = items.iter().map(|i| i.variable.as_str()).collect();
    format!("{}{}", COMMAND_PREFIX, vars.join(","))
}

/// Informational command-length budget for an item list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandBudget {
    pub length: usize,
    /// `length / COMMAND_LIMIT`, clamped to [0, 1].
    pub limit_fraction: f32,
    pub over_limit: bool,
}

pub fn command_budget(items: &[Item]) -> CommandBudget {
    let length = build_command(items).len();
    CommandBudget {
        length,
        limit_fraction: (length as f32 / COMMAND_LIMIT as f32).min(1.0),
        over_limit: length > COMMAND_LIMIT,
    }
}
