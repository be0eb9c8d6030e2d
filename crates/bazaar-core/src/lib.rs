//! # bazaar-core: Pure Business Logic for Bazaar
//!
//! This crate holds everything about items and merchants that can be decided
//! without touching a database or a socket.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Bazaar Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    /items  /items/find  /merchants  /merchants/{id}/items       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bazaar-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  search   │  │pagination │  │   │
//! │  │   │   Item    │  │   Money   │  │ pipeline  │  │   Page    │  │   │
//! │  │   │ Merchant  │  │  parsing  │  │ criteria  │  │  window   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bazaar-db (SQLite)                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Merchant, Invoice, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation for writes
//! - [`search`] - Search parameter validation pipeline
//! - [`pagination`] - Page/page-size windowing rules
//!
//! ## Example Usage
//!
//! ```rust
//! use bazaar_core::search::{ItemSearch, ItemSearchParams};
//!
//! let params = ItemSearchParams {
//!     name: None,
//!     min_price: Some("5".to_string()),
//!     max_price: Some("10.50".to_string()),
//! };
//!
//! match params.validate().unwrap() {
//!     ItemSearch::ByPrice(range) => {
//!         assert_eq!(range.min.cents(), 500);
//!         assert_eq!(range.max.map(|m| m.cents()), Some(1050));
//!     }
//!     ItemSearch::ByName(_) => unreachable!(),
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pagination;
pub mod search;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, SearchError, ValidationError};
pub use money::Money;
pub use pagination::{Page, PageParams};
pub use search::{fold_name, ItemSearch, ItemSearchParams, MerchantSearchParams, NameQuery, PriceRange, SearchMode};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page size used when a listing request does not supply a usable one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound on `per_page` so a single request cannot pull a whole table.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Maximum length of item and merchant names.
pub const MAX_NAME_LENGTH: usize = 200;
