//! # nexus-core: Sale Engine for Nexus POS
//!
//! Products, stock, carts, and the step that turns a cart into a receipt.
//! Pure logic with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Nexus POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/register (CLI)                              │   │
//! │  │        config.toml, tracing subscriber, receipt printing        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ nexus-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  ledger   │  │  catalog  │  │  engine   │  │  history  │  │   │
//! │  │   │ Inventory │  │  id ↔ sku │  │ PosEngine │  │ hash chain│  │   │
//! │  │   │   Cart    │  │  Product  │  │ SaleLine  │  │ Register  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`ledger`] - Generic per-product quantity store
//! - [`inventory`] / [`cart`] - The two ledger specializations
//! - [`catalog`] - Dual-keyed product lookup
//! - [`engine`] - `create_transaction`, the sale algorithm
//! - [`transaction`] - Immutable receipts and sale lines
//! - [`history`] - Append-only receipt chain
//! - [`register`] - Lock-guarded state for concurrent checkouts
//! - [`receipt_hash`] - SHA-256 chain digests
//! - [`money`] - Integer money
//! - [`error`] / [`validation`] - Typed failures and identity checks
//!
//! ## Example Usage
//!
//! ```rust
//! use nexus_core::{Cart, Inventory, Money, PosEngine, Product, ProductCatalog};
//!
//! let mut catalog = ProductCatalog::new();
//! let mut inventory = Inventory::new();
//!
//! let espresso = Product::new("KAF-01", "Espresso", Money::from_major_minor(2, 50), 1);
//! catalog.add_product(espresso.clone()).unwrap();
//! inventory.set_stock(espresso.id, 100);
//!
//! let mut cart = Cart::new();
//! cart.set_item_quantity(espresso.id, 2);
//!
//! let tx = PosEngine::new(&catalog, &mut inventory)
//!     .create_transaction(&cart, Some("0000000000000000"))
//!     .unwrap();
//!
//! assert_eq!(tx.grand_total(), Money::from_cents(500));
//! assert_eq!(inventory.stock(espresso.id).unwrap(), 98);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod history;
pub mod inventory;
pub mod ledger;
pub mod money;
pub mod product;
pub mod receipt_hash;
pub mod register;
pub mod transaction;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartEntry};
pub use catalog::ProductCatalog;
pub use engine::PosEngine;
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use history::{TransactionHistory, DEFAULT_SEED_HASH};
pub use inventory::{Inventory, InventoryEntry};
pub use ledger::{QuantityEntry, QuantityLedger};
pub use money::Money;
pub use product::Product;
pub use register::{Register, RegisterState};
pub use transaction::{SaleLine, Transaction};
