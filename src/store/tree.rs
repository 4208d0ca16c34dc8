//! Recursive forest algorithms for menu item trees.
//!
//! Every mutation here is functional: it returns a rebuilt forest and leaves
//! the input untouched, so snapshots handed out before the mutation never
//! change under their holder. Only the path from the mutated node up to its
//! root is rebuilt; unaffected subtrees are carried over unchanged.
//!
//! Ids are unique per forest, so each search terminates on the first match.
//! All traversals are depth-first and O(total nodes) worst case.

use std::collections::HashSet;

use crate::errors::StoreError;
use crate::models::{Menu, MenuItem, MenuItemPatch};

/// Depth-first search for a node anywhere in the forest.
pub fn find_node<'a>(items: &'a [MenuItem], id: &str) -> Option<&'a MenuItem> {
    for item in items {
        if item.id == id {
            return Some(item);
        }
        if let Some(found) = find_node(&item.children, id) {
            return Some(found);
        }
    }
    None
}

/// Whether the forest contains a node with this id.
pub fn contains(items: &[MenuItem], id: &str) -> bool {
    find_node(items, id).is_some()
}

/// Collect every id in the forest, depth-first.
pub fn collect_ids(items: &[MenuItem], out: &mut Vec<String>) {
    for item in items {
        out.push(item.id.clone());
        collect_ids(&item.children, out);
    }
}

/// Total number of nodes in the forest.
pub fn count_nodes(items: &[MenuItem]) -> usize {
    items
        .iter()
        .map(|item| 1 + count_nodes(&item.children))
        .sum()
}

/// Next sibling sort key: one past the largest existing `order`.
///
/// Keys are not required to be contiguous, only ascending; gaps left by
/// deletions are fine.
pub fn next_order(siblings: &[MenuItem]) -> i64 {
    siblings
        .iter()
        .map(|item| item.order)
        .max()
        .map_or(0, |max| max + 1)
}

/// Renumber `order` sequentially (0, 1, 2, ...) from position.
pub fn renumber(items: Vec<MenuItem>) -> Vec<MenuItem> {
    items
        .into_iter()
        .enumerate()
        .map(|(idx, mut item)| {
            item.order = idx as i64;
            item
        })
        .collect()
}

/// Stable-sort every sibling group by `order`, keeping insertion sequence on
/// ties. Used to normalize forests coming back from storage.
pub fn sort_siblings(items: Vec<MenuItem>) -> Vec<MenuItem> {
    let mut items: Vec<MenuItem> = items
        .into_iter()
        .map(|mut item| {
            item.children = sort_siblings(std::mem::take(&mut item.children));
            item
        })
        .collect();
    items.sort_by_key(|item| item.order);
    items
}

/// Append `child` to the children of `parent_id`, wherever that node sits.
///
/// The child's `order` is derived from its new sibling group. Returns the
/// rebuilt forest and the inserted node, or `None` when no node has
/// `parent_id` (the caller surfaces that as `InvalidParent`).
pub fn insert_under(
    items: &[MenuItem],
    parent_id: &str,
    child: MenuItem,
) -> Option<(Vec<MenuItem>, MenuItem)> {
    let mut pending = Some(child);
    let mut inserted = None;
    let rebuilt = insert_rec(items, parent_id, &mut pending, &mut inserted);
    inserted.map(|item| (rebuilt, item))
}

fn insert_rec(
    items: &[MenuItem],
    parent_id: &str,
    pending: &mut Option<MenuItem>,
    inserted: &mut Option<MenuItem>,
) -> Vec<MenuItem> {
    items
        .iter()
        .map(|item| {
            if item.id == parent_id {
                if let Some(mut child) = pending.take() {
                    let mut node = item.clone();
                    child.order = next_order(&node.children);
                    *inserted = Some(child.clone());
                    node.children.push(child);
                    return node;
                }
            }
            if pending.is_some() && !item.children.is_empty() {
                let mut node = item.clone();
                node.children = insert_rec(&item.children, parent_id, pending, inserted);
                return node;
            }
            item.clone()
        })
        .collect()
}

/// Apply a shallow patch to the node with `id`, leaving siblings, ancestors
/// and the node's own children structurally untouched.
///
/// Returns the rebuilt forest and the patched node, or `None` if the id is
/// absent.
pub fn update_node(
    items: &[MenuItem],
    id: &str,
    patch: &MenuItemPatch,
) -> Option<(Vec<MenuItem>, MenuItem)> {
    let mut updated = None;
    let rebuilt = update_rec(items, id, patch, &mut updated);
    updated.map(|item| (rebuilt, item))
}

fn update_rec(
    items: &[MenuItem],
    id: &str,
    patch: &MenuItemPatch,
    updated: &mut Option<MenuItem>,
) -> Vec<MenuItem> {
    items
        .iter()
        .map(|item| {
            if updated.is_none() && item.id == id {
                let mut node = item.clone();
                apply_patch(&mut node, patch);
                *updated = Some(node.clone());
                return node;
            }
            if updated.is_none() && !item.children.is_empty() {
                let mut node = item.clone();
                node.children = update_rec(&item.children, id, patch, updated);
                return node;
            }
            item.clone()
        })
        .collect()
}

fn apply_patch(node: &mut MenuItem, patch: &MenuItemPatch) {
    if let Some(label) = &patch.label {
        node.label = label.clone();
    }
    if let Some(url) = &patch.url {
        node.url = url.clone();
    }
    if let Some(kind) = patch.kind {
        node.kind = kind;
    }
    if let Some(page_id) = &patch.page_id {
        node.page_id = Some(page_id.clone());
    }
    if let Some(target) = patch.target {
        node.target = target;
    }
    if let Some(visible) = patch.visible {
        node.visible = visible;
    }
}

/// Replace the children of `id` wholesale, renumbering their `order` from
/// position. Returns the rebuilt forest and the node with its new children,
/// or `None` if the id is absent.
pub fn replace_children(
    items: &[MenuItem],
    id: &str,
    children: Vec<MenuItem>,
) -> Option<(Vec<MenuItem>, MenuItem)> {
    let mut pending = Some(renumber(children));
    let mut replaced = None;
    let rebuilt = replace_rec(items, id, &mut pending, &mut replaced);
    replaced.map(|item| (rebuilt, item))
}

fn replace_rec(
    items: &[MenuItem],
    id: &str,
    pending: &mut Option<Vec<MenuItem>>,
    replaced: &mut Option<MenuItem>,
) -> Vec<MenuItem> {
    items
        .iter()
        .map(|item| {
            if item.id == id {
                if let Some(children) = pending.take() {
                    let mut node = item.clone();
                    node.children = children;
                    *replaced = Some(node.clone());
                    return node;
                }
            }
            if pending.is_some() && !item.children.is_empty() {
                let mut node = item.clone();
                node.children = replace_rec(&item.children, id, pending, replaced);
                return node;
            }
            item.clone()
        })
        .collect()
}

/// Remove the node with `id` together with its entire subtree.
///
/// Returns the rebuilt forest, or `None` if nothing was removed.
pub fn remove_node(items: &[MenuItem], id: &str) -> Option<Vec<MenuItem>> {
    let mut removed = false;
    let rebuilt = remove_rec(items, id, &mut removed);
    removed.then_some(rebuilt)
}

fn remove_rec(items: &[MenuItem], id: &str, removed: &mut bool) -> Vec<MenuItem> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if !*removed && item.id == id {
            // Dropping the node drops all of its descendants with it.
            *removed = true;
            continue;
        }
        if !*removed && !item.children.is_empty() {
            let mut node = item.clone();
            node.children = remove_rec(&item.children, id, removed);
            out.push(node);
        } else {
            out.push(item.clone());
        }
    }
    out
}

/// First id that appears more than once anywhere in the forest, if any.
pub fn find_duplicate_id(items: &[MenuItem]) -> Option<String> {
    let mut ids = Vec::new();
    collect_ids(items, &mut ids);
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().find(|id| !seen.insert(id.clone()))
}

/// Check the structural invariants of a menu: item ids unique across the
/// whole forest, and `updatedAt` never earlier than `createdAt`.
pub fn validate_menu(menu: &Menu) -> Result<(), StoreError> {
    if let Some(dup) = find_duplicate_id(&menu.items) {
        return Err(StoreError::CorruptState(format!(
            "Menu {} contains duplicate item id {}",
            menu.id, dup
        )));
    }
    if menu.updated_at < menu.created_at {
        return Err(StoreError::CorruptState(format!(
            "Menu {} has updatedAt earlier than createdAt",
            menu.id
        )));
    }
    Ok(())
}
