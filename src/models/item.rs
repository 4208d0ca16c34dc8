//! Menu item model matching the frontend MenuItem interface.

use serde::{Deserialize, Serialize};

/// What a navigation entry links to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// An internal page; carries a weak `pageId` reference.
    Page,
    /// An external URL.
    External,
    /// A free-form entry (anchor, script trigger, ...).
    Custom,
}

/// Browser target for a navigation entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LinkTarget {
    #[serde(rename = "_self")]
    SameWindow,
    #[serde(rename = "_blank")]
    NewWindow,
}

/// One navigation entry. Items nest arbitrarily deep through `children`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Unique across the owning menu's entire forest, not just among siblings.
    pub id: String,
    pub label: String,
    pub url: String,
    pub kind: ItemKind,
    /// Weak reference to an externally-owned page. Relation only: the page
    /// may have been deleted, and the store never resolves or validates it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    pub target: LinkTarget,
    /// Sort key among siblings, derived from position at write time. Ties
    /// are broken by insertion order.
    pub order: i64,
    pub visible: bool,
    /// Empty and absent are the same thing: no children.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItem>,
}

/// Fields for creating a new menu item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    pub label: String,
    pub url: String,
    pub kind: ItemKind,
    #[serde(default)]
    pub page_id: Option<String>,
    #[serde(default = "default_target")]
    pub target: LinkTarget,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_target() -> LinkTarget {
    LinkTarget::SameWindow
}

fn default_visible() -> bool {
    true
}

/// Partial update for a single menu item.
///
/// `id`, `order` and `children` are managed by the store and cannot be
/// patched; structural edits go through insert/delete/reorder.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPatch {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub kind: Option<ItemKind>,
    #[serde(default)]
    pub page_id: Option<String>,
    #[serde(default)]
    pub target: Option<LinkTarget>,
    #[serde(default)]
    pub visible: Option<bool>,
}
