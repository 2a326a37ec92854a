//! # Quantity Ledger
//!
//! One generic container for "how many of product X", shared by the
//! inventory (stock on hand) and the cart (desired purchase).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    QuantityLedger<T: QuantityEntry>                     │
//! │                                                                         │
//! │   product_id ──► T { product_id, quantity }                            │
//! │                                                                         │
//! │   Inventory = QuantityLedger<InventoryEntry>                           │
//! │   Cart      = QuantityLedger<CartEntry>                                │
//! │                                                                         │
//! │   • every key is its entry's own product id, so at most one entry per  │
//! │     product (last write wins)                                          │
//! │   • "no entry" is NOT the same as "entry with quantity 0"              │
//! │   • set_quantity() is the only quantity-mutation path                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entries are kept in insertion order. Callers must not rely on that as a
//! contract, but it makes receipts list lines in the order they were scanned.

use indexmap::IndexMap;
use tracing::{trace, warn};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};

/// A record that belongs to exactly one product and carries a quantity.
pub trait QuantityEntry {
    /// The product this entry counts.
    fn product_id(&self) -> Uuid;

    /// Current quantity. May be any integer; rules about sign are enforced
    /// by whoever consumes the ledger.
    fn quantity(&self) -> i64;

    /// Overwrites the quantity in place.
    fn set_quantity(&mut self, quantity: i64);
}

/// Per-product quantity store keyed by product id.
#[derive(Debug, Clone)]
pub struct QuantityLedger<T> {
    entries: IndexMap<Uuid, T>,
}

impl<T> Default for QuantityLedger<T> {
    fn default() -> Self {
        QuantityLedger {
            entries: IndexMap::new(),
        }
    }
}

impl<T: QuantityEntry> QuantityLedger<T> {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for a product, if any.
    pub fn get(&self, product_id: Uuid) -> Option<&T> {
        self.entries.get(&product_id)
    }

    /// Iterates over all entries. Call again to restart.
    pub fn entries(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.values()
    }

    pub fn contains(&self, product_id: Uuid) -> bool {
        self.entries.contains_key(&product_id)
    }

    /// Number of products with an entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts or fully replaces the entry for `entry.product_id()`.
    pub fn upsert(&mut self, entry: T) {
        self.entries.insert(entry.product_id(), entry);
    }

    /// Inserts or fully replaces the entry stored under `product_id`.
    ///
    /// ## Errors
    /// [`ValidationError::InvalidFormat`] if the entry belongs to a different
    /// product. The ledger is left unchanged.
    pub fn upsert_for(&mut self, product_id: Uuid, entry: T) -> CoreResult<()> {
        if entry.product_id() != product_id {
            warn!(
                key = %product_id,
                entry_product_id = %entry.product_id(),
                "Rejected ledger entry for a different product id"
            );
            return Err(ValidationError::InvalidFormat {
                field: "product_id".to_string(),
                reason: format!("entry belongs to {}, not {}", entry.product_id(), product_id),
            }
            .into());
        }
        self.upsert(entry);
        Ok(())
    }

    /// Removes the entry for a product. No-op if absent.
    pub fn remove(&mut self, product_id: Uuid) {
        self.entries.shift_remove(&product_id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Sets the quantity for a product, creating the entry through `factory`
    /// when none exists yet. A created entry is keyed by its own product id.
    pub fn set_quantity<F>(&mut self, product_id: Uuid, quantity: i64, factory: F)
    where
        F: FnOnce(Uuid, i64) -> T,
    {
        trace!(product_id = %product_id, quantity, "Setting ledger quantity");

        match self.entries.get_mut(&product_id) {
            Some(entry) => entry.set_quantity(quantity),
            None => self.upsert(factory(product_id, quantity)),
        }
    }

    /// Returns the quantity for a product whose entry must exist.
    ///
    /// ## Errors
    /// [`CoreError::EntryNotFound`] if the product has no entry.
    pub fn require_quantity(&self, product_id: Uuid) -> CoreResult<i64> {
        self.entries
            .get(&product_id)
            .map(QuantityEntry::quantity)
            .ok_or(CoreError::EntryNotFound { product_id })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
