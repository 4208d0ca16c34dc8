//! In-memory menu tree store.
//!
//! Owns the complete collection of menus and every item in them. Mutations
//! are synchronous and single-writer (`&mut self`); queries hand out owned
//! snapshots, so no caller ever holds a reference into the live trees.
//! Interested components subscribe to an explicit change channel instead of
//! watching a shared global.

pub mod tree;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{Menu, MenuItem, MenuItemPatch, MenuPatch, NewMenuItem};

/// Notification sent to subscribers after every successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    MenuCreated { menu_id: String },
    MenuUpdated { menu_id: String },
    MenuDeleted { menu_id: String },
    ItemInserted { menu_id: String, item_id: String },
    ItemUpdated { menu_id: String, item_id: String },
    ItemDeleted { menu_id: String, item_id: String },
    ItemsReordered { menu_id: String },
    /// The whole collection was replaced (startup load or seed).
    Reloaded,
}

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// The menu tree store.
#[derive(Debug)]
pub struct MenuStore {
    /// Menus in creation order; that order is the `find_by_location` tie-break.
    menus: Vec<Menu>,
    /// Currently selected menu id (editor state). Transient: never persisted,
    /// cleared when the menu it points at goes away.
    selected: Option<String>,
    events: broadcast::Sender<ChangeEvent>,
}

impl Default for MenuStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            menus: Vec::new(),
            selected: None,
            events,
        }
    }

    /// Subscribe to change notifications. Slow or dropped receivers never
    /// block or fail a mutation.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: ChangeEvent) {
        // send only fails when there are no receivers, which is fine
        let _ = self.events.send(event);
    }

    /// Mutation timestamp for a menu: strictly after the previous one even
    /// when the wall clock has not advanced between two mutations.
    fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
        let now = Utc::now();
        if now > previous {
            now
        } else {
            previous + Duration::microseconds(1)
        }
    }

    fn menu_index(&self, id: &str) -> Result<usize, StoreError> {
        self.menus
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("Menu {} not found", id)))
    }

    // ==================== MENU OPERATIONS ====================

    /// Create an empty menu at `location`. Always succeeds; uniqueness of
    /// `(name, location)` is not this layer's concern.
    pub fn create_menu(&mut self, name: &str, location: &str) -> Menu {
        let now = Utc::now();
        let menu = Menu {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            location: location.to_string(),
            items: Vec::new(),
            active: true,
            created_at: now,
            updated_at: now,
        };

        self.menus.push(menu.clone());
        tracing::debug!("Created menu {} at location {}", menu.id, menu.location);
        self.emit(ChangeEvent::MenuCreated {
            menu_id: menu.id.clone(),
        });
        menu
    }

    /// Delete a menu and everything in it. Returns whether a menu was
    /// removed; a missing id is an idempotent no-op, not an error.
    pub fn delete_menu(&mut self, id: &str) -> bool {
        let Some(idx) = self.menus.iter().position(|m| m.id == id) else {
            return false;
        };

        self.menus.remove(idx);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        tracing::debug!("Deleted menu {}", id);
        self.emit(ChangeEvent::MenuDeleted {
            menu_id: id.to_string(),
        });
        true
    }

    /// Shallow-merge `patch` onto a menu. `None` if the menu is not found.
    /// The id is immutable; timestamps are store-managed.
    pub fn update_menu(&mut self, id: &str, patch: &MenuPatch) -> Option<Menu> {
        let menu = self.menus.iter_mut().find(|m| m.id == id)?;

        if let Some(name) = &patch.name {
            menu.name = name.clone();
        }
        if let Some(location) = &patch.location {
            menu.location = location.clone();
        }
        if let Some(active) = patch.active {
            menu.active = active;
        }
        menu.updated_at = Self::next_timestamp(menu.updated_at);

        let updated = menu.clone();
        self.emit(ChangeEvent::MenuUpdated {
            menu_id: updated.id.clone(),
        });
        Some(updated)
    }

    // ==================== ITEM OPERATIONS ====================

    /// Insert a new item into a menu, either at the top level (`parent_id`
    /// None) or under the named parent anywhere in the forest.
    ///
    /// A missing menu is `NotFound`; a parent id absent from the forest is
    /// `InvalidParent`, never a silent append at the root. The item's
    /// `order` is derived from its new sibling group, not from the clock.
    pub fn insert_item(
        &mut self,
        menu_id: &str,
        new_item: NewMenuItem,
        parent_id: Option<&str>,
    ) -> Result<MenuItem, StoreError> {
        let idx = self.menu_index(menu_id)?;

        let item = MenuItem {
            id: Uuid::new_v4().to_string(),
            label: new_item.label,
            url: new_item.url,
            kind: new_item.kind,
            page_id: new_item.page_id,
            target: new_item.target,
            order: 0,
            visible: new_item.visible,
            children: Vec::new(),
        };

        let menu = &self.menus[idx];
        let (rebuilt, inserted) = match parent_id {
            Some(pid) => tree::insert_under(&menu.items, pid, item).ok_or_else(|| {
                StoreError::InvalidParent(format!(
                    "Parent item {} not found in menu {}",
                    pid, menu_id
                ))
            })?,
            None => {
                let mut items = menu.items.clone();
                let mut root = item;
                root.order = tree::next_order(&items);
                let inserted = root.clone();
                items.push(root);
                (items, inserted)
            }
        };

        let menu = &mut self.menus[idx];
        menu.items = rebuilt;
        menu.updated_at = Self::next_timestamp(menu.updated_at);

        tracing::debug!(
            "Inserted item {} into menu {} ({} items total)",
            inserted.id,
            menu_id,
            tree::count_nodes(&menu.items)
        );
        self.emit(ChangeEvent::ItemInserted {
            menu_id: menu_id.to_string(),
            item_id: inserted.id.clone(),
        });
        Ok(inserted)
    }

    /// Shallow-merge `patch` onto one item, found depth-first anywhere in
    /// the menu's forest. Siblings, ancestors and the item's children are
    /// untouched. `None` if the menu or the item is not found.
    pub fn update_item(
        &mut self,
        menu_id: &str,
        item_id: &str,
        patch: &MenuItemPatch,
    ) -> Option<MenuItem> {
        let menu = self.menus.iter_mut().find(|m| m.id == menu_id)?;
        let (rebuilt, updated) = tree::update_node(&menu.items, item_id, patch)?;

        menu.items = rebuilt;
        menu.updated_at = Self::next_timestamp(menu.updated_at);

        self.emit(ChangeEvent::ItemUpdated {
            menu_id: menu_id.to_string(),
            item_id: item_id.to_string(),
        });
        Some(updated)
    }

    /// Replace the children of one item wholesale; this is how nested
    /// sibling groups get reordered. The supplied children are renumbered from
    /// position; a replacement that would duplicate an id anywhere in the
    /// forest is rejected and the tree stays as it was.
    pub fn replace_children(
        &mut self,
        menu_id: &str,
        item_id: &str,
        children: Vec<MenuItem>,
    ) -> Result<MenuItem, StoreError> {
        let idx = self.menu_index(menu_id)?;

        let menu = &self.menus[idx];
        let (rebuilt, replaced) = tree::replace_children(&menu.items, item_id, children)
            .ok_or_else(|| {
                StoreError::NotFound(format!("Item {} not found in menu {}", item_id, menu_id))
            })?;
        if let Some(dup) = tree::find_duplicate_id(&rebuilt) {
            return Err(StoreError::CorruptState(format!(
                "Replacement children would duplicate item id {} in menu {}",
                dup, menu_id
            )));
        }

        let menu = &mut self.menus[idx];
        menu.items = rebuilt;
        menu.updated_at = Self::next_timestamp(menu.updated_at);

        self.emit(ChangeEvent::ItemsReordered {
            menu_id: menu_id.to_string(),
        });
        Ok(replaced)
    }

    /// Delete an item and its entire subtree, wherever it sits in the
    /// forest. Returns whether a deletion occurred; a missing menu or item
    /// is an idempotent no-op.
    pub fn delete_item(&mut self, menu_id: &str, item_id: &str) -> bool {
        let Some(menu) = self.menus.iter_mut().find(|m| m.id == menu_id) else {
            return false;
        };
        let Some(rebuilt) = tree::remove_node(&menu.items, item_id) else {
            return false;
        };

        menu.items = rebuilt;
        menu.updated_at = Self::next_timestamp(menu.updated_at);

        tracing::debug!("Deleted item {} from menu {}", item_id, menu_id);
        self.emit(ChangeEvent::ItemDeleted {
            menu_id: menu_id.to_string(),
            item_id: item_id.to_string(),
        });
        true
    }

    /// Replace the top-level item sequence wholesale, re-deriving each
    /// root's `order` from its new position. Children travel with their
    /// roots untouched. Returns the new sequence.
    pub fn reorder_items(
        &mut self,
        menu_id: &str,
        items: Vec<MenuItem>,
    ) -> Result<Vec<MenuItem>, StoreError> {
        let idx = self.menu_index(menu_id)?;

        let renumbered = tree::renumber(items);
        if let Some(dup) = tree::find_duplicate_id(&renumbered) {
            return Err(StoreError::CorruptState(format!(
                "Reordered sequence would duplicate item id {} in menu {}",
                dup, menu_id
            )));
        }

        {
            let menu = &mut self.menus[idx];
            menu.items = renumbered;
            menu.updated_at = Self::next_timestamp(menu.updated_at);
        }

        self.emit(ChangeEvent::ItemsReordered {
            menu_id: menu_id.to_string(),
        });
        Ok(self.menus[idx].items.clone())
    }

    // ==================== QUERIES ====================

    /// Snapshot of the whole collection, in creation order.
    pub fn menus(&self) -> Vec<Menu> {
        self.menus.clone()
    }

    pub fn get_menu(&self, id: &str) -> Option<Menu> {
        self.menus.iter().find(|m| m.id == id).cloned()
    }

    /// Depth-first lookup of one item in one menu.
    pub fn find_item(&self, menu_id: &str, item_id: &str) -> Option<MenuItem> {
        let menu = self.menus.iter().find(|m| m.id == menu_id)?;
        tree::find_node(&menu.items, item_id).cloned()
    }

    /// The menu a renderer should show at `location`: the first active one
    /// in creation order. Duplicate active locations are allowed by the
    /// data model; creation order makes the pick deterministic.
    pub fn find_by_location(&self, location: &str) -> Option<Menu> {
        self.menus
            .iter()
            .find(|m| m.active && m.location == location)
            .cloned()
    }

    // ==================== SELECTION ====================

    /// Point the editor selection at a menu, or clear it with `None`.
    pub fn select_menu(&mut self, id: Option<&str>) -> Result<(), StoreError> {
        match id {
            Some(id) => {
                if !self.menus.iter().any(|m| m.id == id) {
                    return Err(StoreError::NotFound(format!("Menu {} not found", id)));
                }
                self.selected = Some(id.to_string());
            }
            None => self.selected = None,
        }
        Ok(())
    }

    pub fn selected_menu(&self) -> Option<Menu> {
        self.get_menu(self.selected.as_deref()?)
    }

    // ==================== BULK LOAD ====================

    /// Install a loaded or seeded collection, replacing whatever is held.
    /// Transient state resets; used by the startup sequence after
    /// `load_or_seed` completes.
    pub fn replace_all(&mut self, menus: Vec<Menu>) {
        self.menus = menus;
        self.selected = None;
        self.emit(ChangeEvent::Reloaded);
    }
}
