//! # Repository Module
//!
//! Database repository implementations for Bazaar.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  axum handler                                                          │
//! │       │                                                                 │
//! │       │  state.db.items().find_one(&search)                            │
//! │       ▼                                                                 │
//! │  ItemRepository                                                        │
//! │  ├── list(&self, page)                                                 │
//! │  ├── find_by_name / find_by_price                                      │
//! │  ├── insert / update                                                   │
//! │  └── delete ──► cascade::delete_item_cascade                           │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ItemRepository`] - Item CRUD, listing and search
//! - [`MerchantRepository`] - Merchant create, listing and search
//! - [`CustomerRepository`] - Customers billed by invoices
//! - [`InvoiceRepository`] - Invoices and their item lines

pub mod customer;
pub mod invoice;
pub mod item;
pub mod merchant;

pub use customer::CustomerRepository;
pub use invoice::InvoiceRepository;
pub use item::ItemRepository;
pub use merchant::MerchantRepository;
