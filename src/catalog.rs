//! Item Catalog
//!
//! Ordered, read-only collection of known item kinds: the sidebar source
//! list and the authoritative lookup for backfilling variable and image
//! fields on import.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult, Item};

/// One entry of the static item-kind catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemKind {
    pub item: String,
    pub variable: String,
    pub image: String,
}

#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    kinds: Vec<ItemKind>,
    by_name: HashMap<String, usize>,
}

/// Wire shape of a catalog file: `{ "items": [ ... ] }`.
#[derive(Deserialize)]
struct CatalogFile {
    items: Vec<ItemKind>,
}

impl ItemCatalog {
    pub fn new(kinds: Vec<ItemKind>) -> ItemCatalog {
        let by_name = kinds
            .iter()
            .enumerate()
            .map(|(i, k)| (k.item.clone(), i))
            .collect();
        ItemCatalog { kinds, by_name }
    }

    pub fn from_json(json: &str) -> DomainResult<ItemCatalog> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| DomainError::InvalidInput(format!("catalog parse failed: {}", e)))?;
        Ok(ItemCatalog::new(file.items))
    }

    pub fn get(&self, name: &str) -> Option<&ItemKind> {
        self.by_name.get(name).map(|&i| &self.kinds[i])
    }

    pub fn kinds(&self) -> &[ItemKind] {
        &self.kinds
    }

    /// All kinds as sidebar items. Sidebar items use the kind name as their
    /// stable uid; a fresh uid is handed out only when one is cloned into a
    /// chest.
    pub fn sidebar_items(&self) -> Vec<Item> {
        self.kinds.iter().map(kind_to_item).collect()
    }

    /// Sidebar item for one kind name.
    pub fn sidebar_item(&self, name: &str) -> Option<Item> {
        self.get(name).map(kind_to_item)
    }
}

fn kind_to_item(kind: &ItemKind) -> Item {
    Item {
        uid: kind.item.clone(),
        item: kind.item.clone(),
        variable: kind.variable.clone(),
        image: kind.image.clone(),
    }
}
