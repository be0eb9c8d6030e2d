//! # Domain Types
//!
//! Core domain types used throughout Bazaar.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Merchant     │   │      Item       │   │    Invoice      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  merchant_id    │   │  id             │       │
//! │  │  name           │   │  name           │   │  customer_id    │       │
//! │  └─────────────────┘   │  description    │   │  status         │       │
//! │                        │  unit_price     │   └────────▲────────┘       │
//! │                        └────────▲────────┘            │                │
//! │                                 │   ┌─────────────────┴─┐              │
//! │                                 └───│   InvoiceItem     │              │
//! │                                     │  item_id          │              │
//! │                                     │  invoice_id       │              │
//! │                                     └───────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity uses an auto-incrementing integer id. Ids only ever grow, so
//! ordering by id is ordering by creation time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Merchant
// =============================================================================

/// A seller owning zero or more items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Merchant {
    pub id: i64,
    /// Display name, searched case-insensitively.
    pub name: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a merchant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewMerchant {
    pub name: String,
}

// =============================================================================
// Item
// =============================================================================

/// A sellable product belonging to one merchant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Item {
    pub id: i64,

    /// Display name, searched case-insensitively and used for ordering.
    pub name: String,

    pub description: String,

    /// Unit price in cents (smallest currency unit).
    pub unit_price_cents: i64,

    /// Owning merchant.
    pub merchant_id: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

/// Validated input for creating an item.
///
/// Built by the API layer once every required field is present; see
/// [`crate::validation::validate_new_item`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub unit_price: Money,
    pub merchant_id: i64,
}

/// A partial update to an item. `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub unit_price: Option<Money>,
    pub merchant_id: Option<i64>,
}

impl ItemChanges {
    /// Returns true when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.unit_price.is_none()
            && self.merchant_id.is_none()
    }

    /// Applies the supplied fields to `item`, keeping every other field.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::{Item, ItemChanges};
    /// use chrono::Utc;
    ///
    /// let now = Utc::now();
    /// let item = Item {
    ///     id: 1,
    ///     name: "Lamp".into(),
    ///     description: "Brass desk lamp".into(),
    ///     unit_price_cents: 4500,
    ///     merchant_id: 3,
    ///     created_at: now,
    ///     updated_at: now,
    /// };
    ///
    /// let changes = ItemChanges { name: Some("Desk Lamp".into()), ..Default::default() };
    /// let updated = changes.apply(item.clone());
    ///
    /// assert_eq!(updated.name, "Desk Lamp");
    /// assert_eq!(updated.description, item.description);
    /// assert_eq!(updated.unit_price_cents, 4500);
    /// ```
    pub fn apply(self, mut item: Item) -> Item {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(price) = self.unit_price {
            item.unit_price_cents = price.cents();
        }
        if let Some(merchant_id) = self.merchant_id {
            item.merchant_id = merchant_id;
        }
        item
    }
}

// =============================================================================
// Customer
// =============================================================================

/// The party an invoice bills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

// =============================================================================
// Invoice
// =============================================================================

/// A billing record for a customer, linked to items through [`InvoiceItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Invoice {
    pub id: i64,
    pub customer_id: i64,
    /// Free-form status such as `shipped`, `packaged` or `returned`.
    pub status: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Invoice Item
// =============================================================================

/// Join row linking an invoice to an item.
///
/// Uses snapshot pattern: the unit price is frozen at invoicing time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct InvoiceItem {
    pub id: i64,
    pub invoice_id: i64,
    pub item_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
