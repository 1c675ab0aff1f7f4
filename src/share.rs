//! Profile Persistence and Share Codes
//!
//! The tolerant stored shapes a profile travels in (file export, local
//! storage, URL fragment), load-time normalization against the catalog,
//! and the compressed base64 share-code framing. Reading and writing the
//! actual storage belongs to the host.

use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};

use crate::catalog::ItemCatalog;
use crate::domain::{Chest, DomainError, DomainResult, Item, Profile, Tab};
use crate::ids::UidGenerator;

/// Prefix of a share fragment in a URL.
pub const SHARE_FRAGMENT_PREFIX: &str = "#p=";

/// Stored profile shape. Tolerant: the legacy flat `chests` form (an
/// implicit single tab) is still accepted, and any ids present in the
/// payload are ignored on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tabs: Option<Vec<StoredTab>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chests: Option<Vec<StoredChest>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredTab {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub chests: Vec<StoredChest>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredChest {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub items: Vec<StoredItem>,
}

/// Minimal stored item: only the kind name is required; variable and
/// image are backfilled from the catalog on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredItem {
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Normalize a stored profile into a live one. Every chest gets a fresh
/// profile-global id, every tab a fresh id, every item a fresh uid.
/// A payload with neither `tabs` nor `chests` is a load failure; the
/// caller decides whether to fall back to [`Profile::starter`].
pub fn load_profile(
    stored: &StoredProfile,
    catalog: &ItemCatalog,
    uids: &mut dyn UidGenerator,
) -> DomainResult<Profile> {
    let name = if stored.name.is_empty() {
        "Imported Profile".to_string()
    } else {
        stored.name.clone()
    };

    let mut chest_id = 0;
    let mut load_chest = |raw: &StoredChest| {
        chest_id += 1;
        load_stored_chest(raw, chest_id, catalog, uids)
    };

    if let Some(stored_tabs) = &stored.tabs {
        let tabs = stored_tabs
            .iter()
            .enumerate()
            .map(|(i, raw)| Tab {
                id: i as u32 + 1,
                name: raw.name.clone(),
                chests: raw.chests.iter().map(&mut load_chest).collect(),
            })
            .collect();
        Ok(Profile { name, tabs })
    } else if let Some(stored_chests) = &stored.chests {
        let mut tab = Tab::new(1, "Tab 1");
        tab.chests = stored_chests.iter().map(&mut load_chest).collect();
        Ok(Profile {
            name,
            tabs: vec![tab],
        })
    } else {
        Err(DomainError::InvalidProfile(
            "profile has neither tabs nor chests".to_string(),
        ))
    }
}

fn load_stored_chest(
    raw: &StoredChest,
    id: u32,
    catalog: &ItemCatalog,
    uids: &mut dyn UidGenerator,
) -> Chest {
    let icon = raw.icon.strip_suffix(".png").unwrap_or(&raw.icon);
    Chest {
        id,
        label: raw.label.clone(),
        icon: if icon.is_empty() { "barrel".to_string() } else { icon.to_string() },
        checked: raw.checked,
        items: raw.items.iter().map(|i| load_stored_item(i, catalog, uids)).collect(),
    }
}

/// Backfill missing variable/image from the catalog; unknown kinds fall
/// back to an empty variable and `{name}.png`.
fn load_stored_item(raw: &StoredItem, catalog: &ItemCatalog, uids: &mut dyn UidGenerator) -> Item {
    let kind = catalog.get(&raw.item);
    Item {
        uid: uids.next_uid(),
        item: raw.item.clone(),
        variable: raw
            .variable
            .clone()
            .or_else(|| kind.map(|k| k.variable.clone()))
            .unwrap_or_default(),
        image: raw
            .image
            .clone()
            .or_else(|| kind.map(|k| k.image.clone()))
            .unwrap_or_else(|| format!("{}.png", raw.item)),
    }
}

/// Full export shape for files and local storage.
pub fn export_profile(name: &str, tabs: &[Tab]) -> StoredProfile {
    StoredProfile {
        name: name.to_string(),
        tabs: Some(
            tabs.iter()
                .map(|tab| StoredTab {
                    name: tab.name.clone(),
                    chests: tab
                        .chests
                        .iter()
                        .map(|chest| StoredChest {
                            label: chest.label.clone(),
                            icon: chest.icon.clone(),
                            checked: chest.checked,
                            items: chest
                                .items
                                .iter()
                                .map(|item| StoredItem {
                                    item: item.item.clone(),
                                    variable: Some(item.variable.clone()),
                                    image: Some(item.image.clone()),
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        ),
        chests: None,
    }
}

/// Minimal share shape: variable and image are reconstructed from the
/// catalog on import, so only kind names travel.
pub fn minimal_profile(name: &str, tabs: &[Tab]) -> StoredProfile {
    StoredProfile {
        name: name.to_string(),
        tabs: Some(
            tabs.iter()
                .map(|tab| StoredTab {
                    name: tab.name.clone(),
                    chests: tab
                        .chests
                        .iter()
                        .map(|chest| StoredChest {
                            label: chest.label.clone(),
                            icon: chest.icon.clone(),
                            checked: false,
                            items: chest
                                .items
                                .iter()
                                .map(|item| StoredItem {
                                    item: item.item.clone(),
                                    variable: None,
                                    image: None,
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        ),
        chests: None,
    }
}

/// Compressed base64 share code for a profile.
pub fn share_code(name: &str, tabs: &[Tab]) -> DomainResult<String> {
    let json = serde_json::to_vec(&minimal_profile(name, tabs))
        .map_err(|e| DomainError::Internal(e.to_string()))?;
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&json)
        .map_err(|e| DomainError::Internal(e.to_string()))?;
    let bytes = encoder.finish().map_err(|e| DomainError::Internal(e.to_string()))?;
    Ok(BASE64.encode(bytes))
}

/// Share code wrapped as a URL fragment.
pub fn share_fragment(name: &str, tabs: &[Tab]) -> DomainResult<String> {
    Ok(format!("{}{}", SHARE_FRAGMENT_PREFIX, share_code(name, tabs)?))
}

/// Decode a share code or share fragment back into the stored shape.
/// Unparseable payloads are a load failure.
pub fn decode_share_code(code: &str) -> DomainResult<StoredProfile> {
    let code = code.trim();
    let code = code.strip_prefix(SHARE_FRAGMENT_PREFIX).unwrap_or(code);
    let bytes = BASE64
        .decode(code)
        .map_err(|e| DomainError::InvalidProfile(format!("share code decode failed: {}", e)))?;
    let mut json = String::new();
    ZlibDecoder::new(&bytes[..])
        .read_to_string(&mut json)
        .map_err(|e| DomainError::InvalidProfile(format!("share code inflate failed: {}", e)))?;
    serde_json::from_str(&json)
        .map_err(|e| DomainError::InvalidProfile(format!("share code parse failed: {}", e)))
}
