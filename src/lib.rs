//! Navigation Menu Store
//!
//! The hierarchical navigation-menu component of the CMS: an in-memory
//! forest of menu entries with recursive insert/update/delete/reorder at
//! arbitrary depth, and a SQLite-backed snapshot layer that revives typed
//! fields on load and seeds default content on first run.
//!
//! The embedding application owns a single [`MenuStore`], installs the
//! result of [`SnapshotStore::load_or_seed`] into it at startup, and saves
//! snapshots back through the same adapter. Routing, authorization and
//! tenant policy live with the callers; this crate is only the tree and
//! its durable-storage contract.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod store;

pub use config::Config;
pub use db::{init_database, SnapshotStore};
pub use errors::StoreError;
pub use models::{
    ItemKind, LinkTarget, Menu, MenuItem, MenuItemPatch, MenuPatch, NewMenuItem, StoreSnapshot,
};
pub use store::{ChangeEvent, MenuStore};
