//! # Customer Repository
//!
//! Customers only exist so invoices have someone to bill.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use bazaar_core::Customer;

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Inserts a customer and returns it with its generated id.
    pub async fn insert(&self, first_name: &str, last_name: &str) -> DbResult<Customer> {
        debug!(first_name, last_name, "Inserting customer");

        let result = sqlx::query("INSERT INTO customers (first_name, last_name) VALUES (?1, ?2)")
            .bind(first_name)
            .bind(last_name)
            .execute(&self.pool)
            .await?;

        Ok(Customer {
            id: result.last_insert_rowid(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
    }

    /// Gets a customer by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, first_name, last_name FROM customers WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Counts all customers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
