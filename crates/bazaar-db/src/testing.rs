//! Fixtures shared by the repository tests.

use bazaar_core::{Item, Merchant, Money, NewItem, NewMerchant};

use crate::{Database, DbConfig};

/// Fresh, migrated in-memory database.
pub(crate) async fn database() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

pub(crate) async fn merchant(db: &Database, name: &str) -> Merchant {
    db.merchants()
        .insert(&NewMerchant { name: name.to_string() })
        .await
        .unwrap()
}

pub(crate) async fn item(db: &Database, merchant_id: i64, name: &str, cents: i64) -> Item {
    db.items()
        .insert(&NewItem {
            name: name.to_string(),
            description: format!("{name} description"),
            unit_price: Money::from_cents(cents),
            merchant_id,
        })
        .await
        .unwrap()
}

/// Creates a shipped invoice with one line per entry in `item_ids`.
pub(crate) async fn invoice(db: &Database, customer_id: i64, item_ids: &[i64]) -> i64 {
    let invoice = db.invoices().create(customer_id, "shipped").await.unwrap();
    for item_id in item_ids {
        db.invoices().add_item(invoice.id, *item_id, 1).await.unwrap();
    }
    invoice.id
}
