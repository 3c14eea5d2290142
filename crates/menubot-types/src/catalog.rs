//! Catalog item types.
//!
//! The catalog is a flat list of items; categories are implicit, derived as
//! the distinct set of item categories. Deleting the last item of a category
//! removes the category from the browsable menu.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Unique item identity, assigned by the catalog store on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(ItemId)
            .map_err(|_| format!("invalid item id: '{s}'"))
    }
}

/// What an item's payload holds: an opaque chat-protocol file reference,
/// or a literal URL / text body.
///
/// Wire form is lowercase (`file` / `link`), matching the kind token the
/// authoring flow asks the administrator to type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    File,
    Link,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::File => write!(f, "file"),
            ItemKind::Link => write!(f, "link"),
        }
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(ItemKind::File),
            "link" => Ok(ItemKind::Link),
            other => Err(format!("invalid item kind: '{other}'")),
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub category: String,
    pub name: String,
    pub kind: ItemKind,
    /// File reference when `kind` is `File`, URL/text when `kind` is `Link`.
    pub payload: String,
}

/// A fully collected item ready for insertion (no id yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub category: String,
    pub name: String,
    pub kind: ItemKind,
    pub payload: String,
}

/// Partial update for an existing item. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub category: Option<String>,
    pub name: Option<String>,
    pub kind: Option<ItemKind>,
    pub payload: Option<String>,
}
