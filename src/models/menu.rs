//! Menu model matching the frontend Menu interface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MenuItem;

/// A named forest of navigation entries bound to a display location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: String,
    pub name: String,
    /// Slot key ("header", "footer", ...) renderers use to pick a menu.
    /// Several menus may share a location; renderers take the first active one.
    pub location: String,
    /// Top-level forest roots, in display order.
    #[serde(default)]
    pub items: Vec<MenuItem>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every structural mutation to the menu or any descendant
    /// item, strictly increasing per mutation.
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a menu. `id` and the timestamps are store-managed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}
