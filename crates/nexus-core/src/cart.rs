//! # Cart
//!
//! What the customer intends to buy, one [`CartEntry`] per product.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cashier Action            Cart Call                 Effect             │
//! │  ──────────────            ─────────                 ──────             │
//! │  Scan item ──────────────► add_item(id, 1) ────────► qty += 1          │
//! │  Type quantity ──────────► set_item_quantity(id, n) ► qty = n          │
//! │  Void line ──────────────► remove(id) ─────────────► entry gone        │
//! │  New customer ───────────► clear() ────────────────► empty             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart itself accepts any quantity. Zero or negative lines are rejected
//! when the sale is created, not here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::ledger::{QuantityEntry, QuantityLedger};

/// A product the customer wants, and how many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product_id: Uuid,
    pub quantity: i64,
    /// When the product first landed in the cart.
    pub added_at: DateTime<Utc>,
}

impl CartEntry {
    pub fn new(product_id: Uuid, quantity: i64) -> Self {
        CartEntry {
            product_id,
            quantity,
            added_at: Utc::now(),
        }
    }
}

impl QuantityEntry for CartEntry {
    fn product_id(&self) -> Uuid {
        self.product_id
    }

    fn quantity(&self) -> i64 {
        self.quantity
    }

    fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }
}

/// Desired-purchase ledger.
pub type Cart = QuantityLedger<CartEntry>;

impl QuantityLedger<CartEntry> {
    /// Sets the desired quantity for a product.
    pub fn set_item_quantity(&mut self, product_id: Uuid, quantity: i64) {
        self.set_quantity(product_id, quantity, CartEntry::new);
    }

    /// Adds `quantity` to whatever is already in the cart for the product.
    ///
    /// Scanning the same item twice gives one line with quantity 2.
    ///
    /// ## Errors
    /// [`CoreError::QuantityOverflow`] if the new quantity leaves the `i64`
    /// range; the cart is left unchanged.
    pub fn add_item(&mut self, product_id: Uuid, quantity: i64) -> CoreResult<()> {
        let current = self.get(product_id).map_or(0, QuantityEntry::quantity);
        let updated = current
            .checked_add(quantity)
            .ok_or(CoreError::QuantityOverflow { product_id })?;
        self.set_item_quantity(product_id, updated);
        Ok(())
    }

    /// Desired quantity for a product that is in the cart.
    pub fn item_quantity(&self, product_id: Uuid) -> CoreResult<i64> {
        self.require_quantity(product_id)
    }

    /// Sum of all line quantities, saturating at the `i64` bounds.
    pub fn total_quantity(&self) -> i64 {
        self.entries()
            .map(QuantityEntry::quantity)
            .fold(0, i64::saturating_add)
    }
}
