//! # Invoice Repository
//!
//! Database operations for invoices and their item lines.
//!
//! ## Invoice Lines
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  invoices                      invoice_items                            │
//! │  ┌────┬──────────┐             ┌────┬────────────┬─────────┬─────────┐  │
//! │  │ id │ status   │             │ id │ invoice_id │ item_id │ price   │  │
//! │  ├────┼──────────┤             ├────┼────────────┼─────────┼─────────┤  │
//! │  │  1 │ shipped  │◄────────────│  1 │     1      │    7    │  1500   │  │
//! │  │  2 │ packaged │◄──────┬─────│  2 │     2      │    7    │  1500   │  │
//! │  └────┴──────────┘       └─────│  3 │     2      │    9    │   250   │  │
//! │                                └────┴────────────┴─────────┴─────────┘  │
//! │                                                                         │
//! │  Deleting item 7 removes lines 1 and 2, then invoice 1 (now empty).    │
//! │  Invoice 2 keeps line 3 and survives.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use bazaar_core::{Invoice, InvoiceItem};

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Creates an invoice for a customer.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - The customer doesn't exist
    pub async fn create(&self, customer_id: i64, status: &str) -> DbResult<Invoice> {
        debug!(customer_id, status, "Creating invoice");

        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO invoices (customer_id, status, created_at) VALUES (?1, ?2, ?3)",
        )
        .bind(customer_id)
        .bind(status)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Invoice {
            id: result.last_insert_rowid(),
            customer_id,
            status: status.to_string(),
            created_at: now,
        })
    }

    /// Adds an item line to an invoice.
    ///
    /// ## Snapshot Pattern
    /// The item's current unit price is copied onto the line.
    pub async fn add_item(&self, invoice_id: i64, item_id: i64, quantity: i64) -> DbResult<InvoiceItem> {
        debug!(invoice_id, item_id, quantity, "Adding invoice item");

        let mut tx = self.pool.begin().await?;

        let unit_price_cents: i64 =
            sqlx::query_scalar("SELECT unit_price_cents FROM items WHERE id = ?1")
                .bind(item_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| DbError::not_found("Item", item_id))?;

        let result = sqlx::query(
            r#"
            INSERT INTO invoice_items (invoice_id, item_id, quantity, unit_price_cents)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(invoice_id)
        .bind(item_id)
        .bind(quantity)
        .bind(unit_price_cents)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(InvoiceItem {
            id: result.last_insert_rowid(),
            invoice_id,
            item_id,
            quantity,
            unit_price_cents,
        })
    }

    /// Gets an invoice by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Invoice>> {
        let invoice = sqlx::query_as::<_, Invoice>(
            "SELECT id, customer_id, status, created_at FROM invoices WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// Gets all lines of an invoice.
    pub async fn get_items(&self, invoice_id: i64) -> DbResult<Vec<InvoiceItem>> {
        let lines = sqlx::query_as::<_, InvoiceItem>(
            r#"
            SELECT id, invoice_id, item_id, quantity, unit_price_cents
            FROM invoice_items
            WHERE invoice_id = ?1
            ORDER BY id
            "#,
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Ids of the invoices that have at least one line for `item_id`.
    pub async fn invoice_ids_for_item(&self, item_id: i64) -> DbResult<Vec<i64>> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT DISTINCT invoice_id FROM invoice_items WHERE item_id = ?1 ORDER BY invoice_id",
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    /// Counts all invoices.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
