//! # Cascading Item Delete
//!
//! Deleting an item removes its invoice lines, and every invoice that was
//! left with no lines at all. Invoices shared with other items survive.
//!
//! ## Transaction Steps
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  delete_item_cascade(item 7)                            │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │   1. load item 7                 ──► missing? NotFound, nothing touched │
//! │   2. capture invoice ids         ──► {A, B, C}                          │
//! │   3. delete lines of item 7, then item 7                                │
//! │   4. orphans among {A, B, C}     ──► LEFT JOIN lines, COUNT = 0         │
//! │                                      {A, C}   (B still has item 9)      │
//! │   5. delete invoices {A, C}                                             │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any error before COMMIT drops the transaction: full rollback.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use bazaar_core::Item;

/// What a cascading delete removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDeletion {
    /// The item as it was just before deletion.
    pub item: Item,
    /// Invoices deleted because this item was their only item, ascending.
    pub removed_invoice_ids: Vec<i64>,
}

/// Deletes an item, its invoice lines and the invoices it alone was on.
///
/// Runs in a single transaction. On any error nothing is changed.
///
/// ## Returns
/// * `Ok(ItemDeletion)` - What was removed
/// * `Err(DbError::NotFound)` - The item doesn't exist
pub async fn delete_item_cascade(pool: &SqlitePool, item_id: i64) -> DbResult<ItemDeletion> {
    debug!(item_id, "Starting cascading item delete");

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    let item = sqlx::query_as::<_, Item>(
        r#"
        SELECT id, name, description, unit_price_cents, merchant_id, created_at, updated_at
        FROM items
        WHERE id = ?1
        "#,
    )
    .bind(item_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| DbError::not_found("Item", item_id))?;

    // 1. invoices this item appears on
    let captured: Vec<i64> = sqlx::query_scalar(
        "SELECT DISTINCT invoice_id FROM invoice_items WHERE item_id = ?1 ORDER BY invoice_id",
    )
    .bind(item_id)
    .fetch_all(&mut *tx)
    .await?;
    debug!(item_id, invoices = ?captured, "Captured invoices");

    // 2. the item's lines, then the item
    let lines = sqlx::query("DELETE FROM invoice_items WHERE item_id = ?1")
        .bind(item_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM items WHERE id = ?1")
        .bind(item_id)
        .execute(&mut *tx)
        .await?;
    debug!(item_id, lines, "Deleted item and its invoice lines");

    // 3. captured invoices with nothing left on them
    let orphans = find_orphaned_invoices(&mut *tx, &captured).await?;
    debug!(item_id, orphans = ?orphans, "Found orphaned invoices");

    // 4. exactly those
    delete_invoices(&mut *tx, &orphans).await?;

    tx.commit()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    info!(
        item_id,
        removed_invoices = orphans.len(),
        "Item deleted"
    );

    Ok(ItemDeletion {
        item,
        removed_invoice_ids: orphans,
    })
}

/// Ids bound per `IN (...)` statement, well under SQLite's bind limit.
const ID_BATCH: usize = 500;

/// Returns the ids in `candidates` whose invoice has no remaining lines,
/// ascending when `candidates` is.
async fn find_orphaned_invoices(conn: &mut SqliteConnection, candidates: &[i64]) -> DbResult<Vec<i64>> {
    let mut orphans = Vec::new();

    for batch in candidates.chunks(ID_BATCH) {
        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT inv.id FROM invoices inv \
             LEFT JOIN invoice_items ii ON ii.invoice_id = inv.id \
             WHERE inv.id IN (",
        );
        let mut ids = query.separated(", ");
        for id in batch {
            ids.push_bind(*id);
        }
        ids.push_unseparated(") GROUP BY inv.id HAVING COUNT(ii.id) = 0 ORDER BY inv.id");

        orphans.extend(query.build_query_scalar::<i64>().fetch_all(&mut *conn).await?);
    }

    Ok(orphans)
}

async fn delete_invoices(conn: &mut SqliteConnection, ids: &[i64]) -> DbResult<()> {
    for batch in ids.chunks(ID_BATCH) {
        let mut query = QueryBuilder::<Sqlite>::new("DELETE FROM invoices WHERE id IN (");
        let mut separated = query.separated(", ");
        for id in batch {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        query.build().execute(&mut *conn).await?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
