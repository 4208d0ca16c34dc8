//! Snapshot persistence for the menu collection.
//!
//! One JSON blob per store key, shaped `{ "menus": [...] }`. Timestamps
//! travel as RFC 3339 text and are revived into `DateTime<Utc>` on load; a
//! snapshot that fails parsing or the structural invariants is corrupt and
//! is never partially trusted.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::StoreError;
use crate::models::{ItemKind, LinkTarget, Menu, MenuItem, StoreSnapshot};
use crate::store::tree;

/// Persistence adapter for the menu collection.
#[derive(Clone)]
pub struct SnapshotStore {
    pool: SqlitePool,
    store_key: String,
}

impl SnapshotStore {
    pub fn new(pool: SqlitePool, store_key: impl Into<String>) -> Self {
        Self {
            pool,
            store_key: store_key.into(),
        }
    }

    /// Persist the menu collection, replacing any previous snapshot under
    /// this key. Only the menus are stored; transient state is not part of
    /// the snapshot shape.
    pub async fn save(&self, menus: &[Menu]) -> Result<(), StoreError> {
        let snapshot = StoreSnapshot {
            menus: menus.to_vec(),
        };
        let data = serde_json::to_string(&snapshot)?;
        let saved_at = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO snapshots (store_key, data, saved_at) VALUES (?, ?, ?)
             ON CONFLICT(store_key) DO UPDATE SET data = excluded.data, saved_at = excluded.saved_at",
        )
        .bind(&self.store_key)
        .bind(&data)
        .bind(&saved_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(
            "Saved snapshot {} ({} menus)",
            self.store_key,
            snapshot.menus.len()
        );
        Ok(())
    }

    /// Load the persisted collection.
    ///
    /// A missing snapshot is an empty collection. A snapshot that fails
    /// JSON parsing or date revival, or that violates the structural
    /// invariants, is `CorruptState`; a bad date is never silently
    /// defaulted. Sibling groups are normalized into display order.
    pub async fn load(&self) -> Result<Vec<Menu>, StoreError> {
        let row = sqlx::query("SELECT data FROM snapshots WHERE store_key = ?")
            .bind(&self.store_key)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(Vec::new());
        };

        let data: String = row.get("data");
        let snapshot: StoreSnapshot = serde_json::from_str(&data)?;

        for menu in &snapshot.menus {
            tree::validate_menu(menu)?;
        }

        Ok(snapshot
            .menus
            .into_iter()
            .map(|mut menu| {
                menu.items = tree::sort_siblings(std::mem::take(&mut menu.items));
                menu
            })
            .collect())
    }

    /// Discard the persisted snapshot under this key.
    pub async fn clear(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM snapshots WHERE store_key = ?")
            .bind(&self.store_key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Write and return the default menu. Refuses with `DuplicateSeed` when
    /// the collection already has content; seeding runs once per detected
    /// empty state, never on every load.
    pub async fn seed(&self, current: &[Menu]) -> Result<Vec<Menu>, StoreError> {
        if !current.is_empty() {
            return Err(StoreError::DuplicateSeed(format!(
                "Refusing to seed: {} menus already present",
                current.len()
            )));
        }

        let menus = vec![default_menu()];
        self.save(&menus).await?;
        tracing::info!("Seeded default menu \"Main Navigation\" at location header");
        Ok(menus)
    }

    /// Startup sequence: load the snapshot, discard it if corrupt, and seed
    /// default content when the collection comes up empty.
    ///
    /// This must complete before the first store mutation; the caller
    /// installs the result via `MenuStore::replace_all`.
    pub async fn load_or_seed(&self) -> Result<Vec<Menu>, StoreError> {
        let menus = match self.load().await {
            Ok(menus) => menus,
            Err(StoreError::CorruptState(msg)) => {
                tracing::warn!("Discarding corrupt snapshot {}: {}", self.store_key, msg);
                self.clear().await?;
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        if !menus.is_empty() {
            tracing::info!(
                "Loaded {} menus ({} items) from snapshot {}",
                menus.len(),
                menus.iter().map(|m| tree::count_nodes(&m.items)).sum::<usize>(),
                self.store_key
            );
            return Ok(menus);
        }

        self.seed(&menus).await
    }
}

/// The first-run menu: a fixed navigation tree so a fresh install never
/// renders an empty header. Ids are literals, not fresh uuids, so two
/// empty-state seedings produce identical trees.
fn default_menu() -> Menu {
    let now = Utc::now();
    Menu {
        id: "menu-main-navigation".to_string(),
        name: "Main Navigation".to_string(),
        location: "header".to_string(),
        items: vec![
            seed_item("item-home", "Home", "/", 0, Vec::new()),
            seed_item(
                "item-about",
                "About",
                "/about",
                1,
                vec![
                    seed_item("item-about-team", "Team", "/about/team", 0, Vec::new()),
                    seed_item(
                        "item-about-history",
                        "History",
                        "/about/history",
                        1,
                        Vec::new(),
                    ),
                ],
            ),
            seed_item("item-contact", "Contact", "/contact", 2, Vec::new()),
        ],
        active: true,
        created_at: now,
        updated_at: now,
    }
}

fn seed_item(id: &str, label: &str, url: &str, order: i64, children: Vec<MenuItem>) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        label: label.to_string(),
        url: url.to_string(),
        kind: ItemKind::Page,
        page_id: None,
        target: LinkTarget::SameWindow,
        order,
        visible: true,
        children,
    }
}
