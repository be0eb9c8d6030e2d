//! # Request and Response Shapes
//!
//! ## Response Envelope
//! ```json
//! {
//!   "data": {
//!     "id": "4",
//!     "type": "item",
//!     "attributes": {
//!       "name": "Item Nemo Facere",
//!       "description": "Sunt eum id eius magni consequuntur delectus veritatis.",
//!       "unit_price": 42.91,
//!       "merchant_id": 1
//!     }
//!   }
//! }
//! ```
//!
//! A single-result search that finds nothing answers `{ "data": {} }`.
//!
//! ## Request Bodies
//! Flat JSON objects. `unit_price` may be a JSON number (`15.5`) or a
//! decimal string (`"15.50"`); either way it is read exactly into cents.

use axum::Json;
use serde::{Deserialize, Serialize};

use bazaar_core::{Item, ItemChanges, Merchant, Money, NewItem, NewMerchant, ValidationError};

// =============================================================================
// Envelope
// =============================================================================

/// `{ "data": ... }`
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    pub fn json(data: T) -> Json<Self> {
        Json(Data { data })
    }
}

/// Serializes as the resource, or as `{}` when nothing matched.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Found<T> {
    Match(T),
    Empty(Empty),
}

#[derive(Debug, Serialize)]
pub struct Empty {}

impl<T> From<Option<T>> for Found<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(found) => Found::Match(found),
            None => Found::Empty(Empty {}),
        }
    }
}

/// `{ "id": "<id>", "type": "...", "attributes": { ... } }`
#[derive(Debug, Serialize)]
pub struct Resource<A> {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub attributes: A,
}

// =============================================================================
// Items
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ItemAttributes {
    pub name: String,
    pub description: String,
    /// Major units; cents stay exact until this last conversion.
    pub unit_price: f64,
    pub merchant_id: i64,
}

pub type ItemResource = Resource<ItemAttributes>;

impl From<Item> for ItemResource {
    fn from(item: Item) -> Self {
        Resource {
            id: item.id.to_string(),
            kind: "item",
            attributes: ItemAttributes {
                unit_price: item.unit_price().to_major_units(),
                name: item.name,
                description: item.description,
                merchant_id: item.merchant_id,
            },
        }
    }
}

/// A price as sent by a client.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(serde_json::Number),
    Text(String),
}

impl PriceInput {
    pub fn to_money(&self, field: &str) -> Result<Money, ValidationError> {
        match self {
            PriceInput::Number(n) => Money::parse(field, &n.to_string()),
            PriceInput::Text(s) => Money::parse(field, s),
        }
    }
}

/// An id as sent by a client, number or numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdInput {
    Number(i64),
    Text(String),
}

impl IdInput {
    pub fn to_id(&self, field: &str) -> Result<i64, ValidationError> {
        match self {
            IdInput::Number(id) => Ok(*id),
            IdInput::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| ValidationError::invalid_format(field, "must be an integer")),
        }
    }
}

/// Body of `POST /items` and `PATCH /items/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub unit_price: Option<PriceInput>,
    pub merchant_id: Option<IdInput>,
}

impl ItemPayload {
    /// Every field is required on create.
    pub fn into_new_item(self) -> Result<NewItem, ValidationError> {
        let name = self.name.ok_or_else(|| ValidationError::required("name"))?;
        let description = self
            .description
            .ok_or_else(|| ValidationError::required("description"))?;
        let unit_price = self
            .unit_price
            .ok_or_else(|| ValidationError::required("unit_price"))?
            .to_money("unit_price")?;
        let merchant_id = self
            .merchant_id
            .ok_or_else(|| ValidationError::required("merchant_id"))?
            .to_id("merchant_id")?;

        Ok(NewItem {
            name,
            description,
            unit_price,
            merchant_id,
        })
    }

    /// Only supplied fields change on update.
    pub fn into_changes(self) -> Result<ItemChanges, ValidationError> {
        Ok(ItemChanges {
            name: self.name,
            description: self.description,
            unit_price: self
                .unit_price
                .map(|p| p.to_money("unit_price"))
                .transpose()?,
            merchant_id: self
                .merchant_id
                .map(|id| id.to_id("merchant_id"))
                .transpose()?,
        })
    }
}

// =============================================================================
// Merchants
// =============================================================================

#[derive(Debug, Serialize)]
pub struct MerchantAttributes {
    pub name: String,
}

pub type MerchantResource = Resource<MerchantAttributes>;

impl From<Merchant> for MerchantResource {
    fn from(merchant: Merchant) -> Self {
        Resource {
            id: merchant.id.to_string(),
            kind: "merchant",
            attributes: MerchantAttributes {
                name: merchant.name,
            },
        }
    }
}

/// Body of `POST /merchants`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MerchantPayload {
    pub name: Option<String>,
}

impl MerchantPayload {
    pub fn into_new_merchant(self) -> Result<NewMerchant, ValidationError> {
        let name = self.name.ok_or_else(|| ValidationError::required("name"))?;
        Ok(NewMerchant { name })
    }
}

/// Converts a list of domain values into resources.
pub fn resources<T, R: From<T>>(values: Vec<T>) -> Vec<R> {
    values.into_iter().map(R::from).collect()
}
