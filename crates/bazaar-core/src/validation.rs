//! # Validation Module
//!
//! Input validation for writes (creating and updating items and merchants).
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (axum + serde)                                │
//! │  ├── Body is JSON of the right shape                                   │
//! │  └── Missing fields arrive as None                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields present and non-blank                             │
//! │  └── Prices non-negative, names bounded                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Search parameters have their own pipeline in [`crate::search`].

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{ItemChanges, NewItem, NewMerchant};
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a name field (item or merchant).
///
/// ## Rules
/// - Must not be blank
/// - At most [`MAX_NAME_LENGTH`] characters
///
/// ## Example
/// ```rust
/// use bazaar_core::validation::validate_name;
///
/// assert!(validate_name("name", "Brass Lamp").is_ok());
/// assert!(validate_name("name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required(field));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a field that only needs to be present and non-blank.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Validates a stored price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use bazaar_core::money::Money;
/// use bazaar_core::validation::validate_price;
///
/// assert!(validate_price("unit_price", Money::from_cents(1099)).is_ok());
/// assert!(validate_price("unit_price", Money::zero()).is_ok());
/// assert!(validate_price("unit_price", Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a foreign key id.
pub fn validate_id(field: &str, id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: i64::MAX,
        });
    }
    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates a complete item before insert.
pub fn validate_new_item(item: &NewItem) -> ValidationResult<()> {
    validate_name("name", &item.name)?;
    validate_required("description", &item.description)?;
    validate_price("unit_price", item.unit_price)?;
    validate_id("merchant_id", item.merchant_id)?;
    Ok(())
}

/// Validates the fields present in a partial update.
///
/// Absent fields are not checked; a supplied field must be as valid as it
/// would be on create.
pub fn validate_item_changes(changes: &ItemChanges) -> ValidationResult<()> {
    if let Some(name) = &changes.name {
        validate_name("name", name)?;
    }
    if let Some(description) = &changes.description {
        validate_required("description", description)?;
    }
    if let Some(price) = changes.unit_price {
        validate_price("unit_price", price)?;
    }
    if let Some(merchant_id) = changes.merchant_id {
        validate_id("merchant_id", merchant_id)?;
    }
    Ok(())
}

/// Validates a merchant before insert.
pub fn validate_new_merchant(merchant: &NewMerchant) -> ValidationResult<()> {
    validate_name("name", &merchant.name)
}

// =============================================================================
// Unit Tests
// =============================================================================
