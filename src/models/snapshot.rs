//! Snapshot model: the exact JSON shape of the persisted blob.

use serde::{Deserialize, Serialize};

use super::Menu;

/// Durable snapshot of the menu collection.
///
/// Transient state (current selection, loading flags) is deliberately not
/// part of this shape; it is reconstructed as empty on every process start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub menus: Vec<Menu>,
}
