//! # Item Repository
//!
//! Database operations for items.
//!
//! ## Key Operations
//! - Paginated listing (all items, or one merchant's items)
//! - Name and price search, single or all results
//! - Create / partial update / cascading delete
//!
//! ## Search Queries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Item Search Works                                │
//! │                                                                         │
//! │  ItemSearch::ByName("tem")                                             │
//! │       └── WHERE name_folded LIKE '%tem%' ESCAPE '\'                    │
//! │                                                                         │
//! │  ItemSearch::ByPrice { min: 1400, max: Some(1500) }                    │
//! │       └── WHERE unit_price_cents >= 1400 AND unit_price_cents <= 1500  │
//! │                                                                         │
//! │  Both:  ORDER BY name, id   LIMIT 1 (One) | no limit (All)             │
//! │                                                                         │
//! │  ┌────┬──────────────┬────────┐                                        │
//! │  │ id │ name         │ cents  │                                        │
//! │  ├────┼──────────────┼────────┤                                        │
//! │  │ 12 │ Item Autem   │ 1450   │ ← first in name order                  │
//! │  │  3 │ Item Tempora │ 1499   │                                        │
//! │  └────┴──────────────┴────────┘                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices are compared as integer cents on both sides, so the bounds are
//! exact.

use std::time::Instant;

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::cascade::{delete_item_cascade, ItemDeletion};
use crate::error::{DbError, DbResult};
use bazaar_core::{fold_name, Item, ItemChanges, ItemSearch, NameQuery, NewItem, Page, PriceRange, SearchMode};

const SELECT_ITEM: &str = r#"
    SELECT id, name, description, unit_price_cents, merchant_id, created_at, updated_at
    FROM items
"#;

/// SQLite treats a negative LIMIT as "no limit".
fn sql_limit(mode: SearchMode) -> i64 {
    mode.limit().map(i64::from).unwrap_or(-1)
}

/// Repository for item database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ItemRepository::new(pool);
///
/// // First page of 20
/// let items = repo.list(Page::default()).await?;
///
/// // Get by ID
/// let item = repo.get_by_id(7).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Lists items in id order, windowed by `page`.
    pub async fn list(&self, page: Page) -> DbResult<Vec<Item>> {
        debug!(size = page.size, number = page.number, "Listing items");

        let items = sqlx::query_as::<_, Item>(&format!(
            "{SELECT_ITEM} ORDER BY id LIMIT ?1 OFFSET ?2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists one merchant's items in id order, windowed by `page`.
    ///
    /// Does not check that the merchant exists; callers that need a 404
    /// look the merchant up first.
    pub async fn list_for_merchant(&self, merchant_id: i64, page: Page) -> DbResult<Vec<Item>> {
        debug!(merchant_id, size = page.size, number = page.number, "Listing merchant items");

        let items = sqlx::query_as::<_, Item>(&format!(
            "{SELECT_ITEM} WHERE merchant_id = ?1 ORDER BY id LIMIT ?2 OFFSET ?3"
        ))
        .bind(merchant_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets an item by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Item))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(&format!("{SELECT_ITEM} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    /// Gets an item by its ID, or `DbError::NotFound`.
    pub async fn require(&self, id: i64) -> DbResult<Item> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Item", id))
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Case-insensitive substring match on `name` (Unicode folding), ordered
    /// by name.
    pub async fn find_by_name(&self, query: &NameQuery, mode: SearchMode) -> DbResult<Vec<Item>> {
        let started = Instant::now();

        let items = sqlx::query_as::<_, Item>(&format!(
            r"{SELECT_ITEM} WHERE name_folded LIKE ?1 ESCAPE '\' ORDER BY name, id LIMIT ?2"
        ))
        .bind(query.like_pattern())
        .bind(sql_limit(mode))
        .fetch_all(&self.pool)
        .await?;

        info!(
            query = %query.as_str(),
            ?mode,
            count = items.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Item name search"
        );
        Ok(items)
    }

    /// Inclusive price range match, ordered by name.
    pub async fn find_by_price(&self, range: &PriceRange, mode: SearchMode) -> DbResult<Vec<Item>> {
        let started = Instant::now();

        let items = sqlx::query_as::<_, Item>(&format!(
            "{SELECT_ITEM} \
             WHERE unit_price_cents >= ?1 AND (?2 IS NULL OR unit_price_cents <= ?2) \
             ORDER BY name, id LIMIT ?3"
        ))
        .bind(range.min.cents())
        .bind(range.max.map(|max| max.cents()))
        .bind(sql_limit(mode))
        .fetch_all(&self.pool)
        .await?;

        info!(
            min_cents = range.min.cents(),
            max_cents = ?range.max.map(|max| max.cents()),
            ?mode,
            count = items.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Item price search"
        );
        Ok(items)
    }

    /// First match for a validated search, or `None`.
    pub async fn find_one(&self, search: &ItemSearch) -> DbResult<Option<Item>> {
        Ok(self.search(search, SearchMode::One).await?.into_iter().next())
    }

    /// Every match for a validated search, possibly empty.
    pub async fn find_all(&self, search: &ItemSearch) -> DbResult<Vec<Item>> {
        self.search(search, SearchMode::All).await
    }

    async fn search(&self, search: &ItemSearch, mode: SearchMode) -> DbResult<Vec<Item>> {
        match search {
            ItemSearch::ByName(query) => self.find_by_name(query, mode).await,
            ItemSearch::ByPrice(range) => self.find_by_price(range, mode).await,
        }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Inserts a new item.
    ///
    /// ## Returns
    /// * `Ok(Item)` - Inserted item with its generated id
    /// * `Err(DbError::NotFound)` - The merchant doesn't exist
    pub async fn insert(&self, new_item: &NewItem) -> DbResult<Item> {
        debug!(name = %new_item.name, merchant_id = new_item.merchant_id, "Inserting item");

        let mut tx = self.pool.begin().await?;
        require_merchant(&mut *tx, new_item.merchant_id).await?;

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO items (name, name_folded, description, unit_price_cents, merchant_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            "#,
        )
        .bind(&new_item.name)
        .bind(fold_name(&new_item.name))
        .bind(&new_item.description)
        .bind(new_item.unit_price.cents())
        .bind(new_item.merchant_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Item {
            id: result.last_insert_rowid(),
            name: new_item.name.clone(),
            description: new_item.description.clone(),
            unit_price_cents: new_item.unit_price.cents(),
            merchant_id: new_item.merchant_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a partial update and returns the resulting item.
    ///
    /// Fields absent from `changes` keep their stored value. An empty
    /// change set returns the item untouched.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - The item, or the new merchant, doesn't exist
    pub async fn update(&self, id: i64, changes: ItemChanges) -> DbResult<Item> {
        debug!(id, ?changes, "Updating item");

        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Item>(&format!("{SELECT_ITEM} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("Item", id))?;

        if changes.is_empty() {
            return Ok(current);
        }

        if let Some(merchant_id) = changes.merchant_id {
            require_merchant(&mut *tx, merchant_id).await?;
        }

        let mut updated = changes.apply(current);
        updated.updated_at = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE items SET
                name = ?2,
                name_folded = ?3,
                description = ?4,
                unit_price_cents = ?5,
                merchant_id = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&updated.name)
        .bind(fold_name(&updated.name))
        .bind(&updated.description)
        .bind(updated.unit_price_cents)
        .bind(updated.merchant_id)
        .bind(updated.updated_at)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        tx.commit().await?;
        Ok(updated)
    }

    /// Deletes an item together with its invoice lines and any invoice
    /// left without items. See [`crate::cascade`].
    pub async fn delete(&self, id: i64) -> DbResult<ItemDeletion> {
        delete_item_cascade(&self.pool, id).await
    }

    /// Counts all items.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Fails with `NotFound` unless the merchant exists.
async fn require_merchant(conn: &mut SqliteConnection, merchant_id: i64) -> DbResult<()> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM merchants WHERE id = ?1")
        .bind(merchant_id)
        .fetch_optional(conn)
        .await?;

    match found {
        Some(_) => Ok(()),
        None => Err(DbError::not_found("Merchant", merchant_id)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
