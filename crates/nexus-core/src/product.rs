//! # Product
//!
//! ## Dual-Key Identity Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product                                                                │
//! │  ─────────────────                                                      │
//! │  id (UUID v7)     ◄── immutable, what ledgers and sale lines key on    │
//! │  sku              ◄── human-facing code, case-insensitive lookup        │
//! │  name             ◄── mutable, snapshotted into each sale line          │
//! │  price            ◄── mutable, snapshotted into each sale line          │
//! │  tax_category_id  ◄── mutable, snapshotted into each sale line          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier. Never changes once assigned.
    #[ts(as = "String")]
    pub id: Uuid,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name shown to cashier and on receipt.
    pub name: String,

    /// Unit price.
    pub price: Money,

    /// Tax category the product is filed under. Rates are resolved elsewhere.
    pub tax_category_id: u32,
}

impl Product {
    /// Creates a product with a freshly generated, time-ordered id.
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        tax_category_id: u32,
    ) -> Self {
        Self::with_id(Uuid::now_v7(), sku, name, price, tax_category_id)
    }

    /// Creates a product under a caller-assigned id.
    pub fn with_id(
        id: Uuid,
        sku: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        tax_category_id: u32,
    ) -> Self {
        Product {
            id,
            sku: sku.into(),
            name: name.into(),
            price,
            tax_category_id,
        }
    }
}
