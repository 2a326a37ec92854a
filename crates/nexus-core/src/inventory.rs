//! # Inventory
//!
//! Stock on hand, one [`InventoryEntry`] per product.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreResult;
use crate::ledger::{QuantityEntry, QuantityLedger};

/// Stock level for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub product_id: Uuid,
    pub quantity: i64,
}

impl InventoryEntry {
    pub fn new(product_id: Uuid, quantity: i64) -> Self {
        InventoryEntry {
            product_id,
            quantity,
        }
    }
}

impl QuantityEntry for InventoryEntry {
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

/// Stock-on-hand ledger.
pub type Inventory = QuantityLedger<InventoryEntry>;

impl QuantityLedger<InventoryEntry> {
    /// Sets the stock level for a product, stocking it if it was never
    /// stocked before.
    pub fn set_stock(&mut self, product_id: Uuid, quantity: i64) {
        self.set_quantity(product_id, quantity, InventoryEntry::new);
    }

    /// Current stock for a product that has been stocked.
    ///
    /// A product that is in the catalog but was never stocked is an error
    /// here, not zero.
    pub fn stock(&self, product_id: Uuid) -> CoreResult<i64> {
        self.require_quantity(product_id)
    }
}
