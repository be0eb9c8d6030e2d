//! # Merchant Repository
//!
//! Merchants are read and created; they are never updated or deleted.

use std::time::Instant;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use bazaar_core::{fold_name, Merchant, NameQuery, NewMerchant, Page, SearchMode};

const SELECT_MERCHANT: &str = "SELECT id, name, created_at, updated_at FROM merchants";

/// Repository for merchant database operations.
#[derive(Debug, Clone)]
pub struct MerchantRepository {
    pool: SqlitePool,
}

impl MerchantRepository {
    /// Creates a new MerchantRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MerchantRepository { pool }
    }

    /// Lists merchants in id order, windowed by `page`.
    pub async fn list(&self, page: Page) -> DbResult<Vec<Merchant>> {
        debug!(size = page.size, number = page.number, "Listing merchants");

        let merchants = sqlx::query_as::<_, Merchant>(&format!(
            "{SELECT_MERCHANT} ORDER BY id LIMIT ?1 OFFSET ?2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(merchants)
    }

    /// Gets a merchant by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Merchant>> {
        let merchant = sqlx::query_as::<_, Merchant>(&format!("{SELECT_MERCHANT} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(merchant)
    }

    /// Gets a merchant by its ID, or `DbError::NotFound`.
    pub async fn require(&self, id: i64) -> DbResult<Merchant> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Merchant", id))
    }

    /// Inserts a new merchant and returns it with its generated id.
    pub async fn insert(&self, new_merchant: &NewMerchant) -> DbResult<Merchant> {
        debug!(name = %new_merchant.name, "Inserting merchant");

        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO merchants (name, name_folded, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
        )
        .bind(&new_merchant.name)
        .bind(fold_name(&new_merchant.name))
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Merchant {
            id: result.last_insert_rowid(),
            name: new_merchant.name.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Case-insensitive substring match on `name`, ordered by name.
    pub async fn find_by_name(&self, query: &NameQuery, mode: SearchMode) -> DbResult<Vec<Merchant>> {
        let started = Instant::now();
        let limit = mode.limit().map(i64::from).unwrap_or(-1);

        let merchants = sqlx::query_as::<_, Merchant>(&format!(
            r"{SELECT_MERCHANT} WHERE name_folded LIKE ?1 ESCAPE '\' ORDER BY name, id LIMIT ?2"
        ))
        .bind(query.like_pattern())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        info!(
            query = %query.as_str(),
            ?mode,
            count = merchants.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Merchant name search"
        );
        Ok(merchants)
    }

    /// First merchant matching `query` in name order, or `None`.
    pub async fn find_one(&self, query: &NameQuery) -> DbResult<Option<Merchant>> {
        Ok(self
            .find_by_name(query, SearchMode::One)
            .await?
            .into_iter()
            .next())
    }

    /// Counts all merchants.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM merchants")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
