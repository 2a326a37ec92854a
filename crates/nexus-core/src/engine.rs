//! # Sale Engine
//!
//! Turns a cart into a [`Transaction`] and debits stock.
//!
//! ## Two Phases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     create_transaction(cart, prev)                      │
//! │                                                                         │
//! │  PLAN (read only)                                                       │
//! │  for each cart entry:                                                   │
//! │     qty <= 0? ─────────────────► NonPositiveQuantity                    │
//! │     product in catalog? ───────► ProductNotFound                        │
//! │     snapshot SaleLine                                                   │
//! │     total leaves i64? ─────────► QuantityOverflow                       │
//! │     stock entry exists? ───────► EntryNotFound                          │
//! │     stock - qty < 0? ──────────► InsufficientStock                      │
//! │     remember new stock (seen by later lines of the same product)       │
//! │                                                                         │
//! │  COMMIT (only if every line planned)                                    │
//! │     write every new stock value                                         │
//! │     seal transaction (id, timestamp, chained receipt hash)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failure anywhere in PLAN returns before inventory is touched, so a
//! rejected sale never leaves a partial debit behind.

use indexmap::IndexMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cart::Cart;
use crate::catalog::ProductCatalog;
use crate::error::{CoreError, CoreResult};
use crate::inventory::Inventory;
use crate::ledger::QuantityEntry;
use crate::money::Money;
use crate::transaction::{SaleLine, Transaction};

/// Stock change decided during planning.
struct PendingDebit {
    product_id: Uuid,
    new_stock: i64,
}

/// Sale engine bound to one catalog and one inventory.
///
/// Reads the catalog, writes the inventory. Holding `&mut Inventory` for the
/// engine's lifetime means nothing else can change stock mid-sale.
#[derive(Debug)]
pub struct PosEngine<'a> {
    catalog: &'a ProductCatalog,
    inventory: &'a mut Inventory,
}

impl<'a> PosEngine<'a> {
    pub fn new(catalog: &'a ProductCatalog, inventory: &'a mut Inventory) -> Self {
        PosEngine { catalog, inventory }
    }

    /// Read access to the inventory the engine debits.
    pub fn inventory(&self) -> &Inventory {
        self.inventory
    }

    /// Creates a sale from `cart`, chained to `previous_hash` (empty if
    /// `None`), and debits stock.
    ///
    /// ## Errors
    /// - [`CoreError::NonPositiveQuantity`] for a cart line with quantity <= 0
    /// - [`CoreError::ProductNotFound`] for a product missing from the catalog
    /// - [`CoreError::EntryNotFound`] for a product that was never stocked
    /// - [`CoreError::InsufficientStock`] if a line would drive stock negative
    /// - [`CoreError::QuantityOverflow`] if a line total, the grand total or
    ///   a stock level leaves the `i64` range
    ///
    /// On error the inventory is unchanged and no transaction exists.
    pub fn create_transaction(
        &mut self,
        cart: &Cart,
        previous_hash: Option<&str>,
    ) -> CoreResult<Transaction> {
        let previous_hash = previous_hash.unwrap_or_default().to_string();

        let (lines, debits) = self.plan(cart).map_err(|err| {
            warn!(error = %err, kind = ?err.kind(), "Sale rejected");
            err
        })?;

        for debit in &debits {
            self.inventory.set_stock(debit.product_id, debit.new_stock);
        }

        let transaction = Transaction::seal(previous_hash, lines);

        info!(
            transaction_id = %transaction.id(),
            lines = transaction.lines().len(),
            grand_total = %transaction.grand_total(),
            receipt_hash = %transaction.current_receipt_hash(),
            "Transaction created"
        );

        Ok(transaction)
    }

    /// Validates every cart line and works out the resulting stock levels
    /// without writing anything.
    ///
    /// Stock is tracked per product across the whole cart, so every check
    /// sees the lines planned before it.
    fn plan(&self, cart: &Cart) -> CoreResult<(Vec<SaleLine>, Vec<PendingDebit>)> {
        let mut lines = Vec::with_capacity(cart.len());
        let mut pending: IndexMap<Uuid, i64> = IndexMap::with_capacity(cart.len());
        let mut grand_total = Money::zero();

        for entry in cart.entries() {
            let product_id = entry.product_id();
            let quantity = entry.quantity();

            if quantity <= 0 {
                return Err(CoreError::NonPositiveQuantity {
                    product_id,
                    quantity,
                });
            }

            let product = self
                .catalog
                .get_by_id(product_id)
                .ok_or(CoreError::ProductNotFound(product_id))?;

            let overflow = || CoreError::QuantityOverflow {
                product_id: product.id,
            };
            let line_total = product
                .price
                .checked_multiply_quantity(quantity)
                .ok_or_else(overflow)?;
            grand_total = grand_total.checked_add(line_total).ok_or_else(overflow)?;

            lines.push(SaleLine::snapshot(product, quantity));

            let current_stock = match pending.get(&product.id) {
                Some(stock) => *stock,
                None => self.inventory.stock(product.id)?,
            };
            let new_stock = current_stock.checked_sub(quantity).ok_or_else(overflow)?;

            debug!(
                sku = %product.sku,
                current_stock,
                requested = quantity,
                new_stock,
                "Planned sale line"
            );

            if new_stock < 0 {
                return Err(CoreError::InsufficientStock {
                    sku: product.sku.clone(),
                    available: current_stock,
                    requested: quantity,
                });
            }

            pending.insert(product.id, new_stock);
        }

        let debits = pending
            .into_iter()
            .map(|(product_id, new_stock)| PendingDebit {
                product_id,
                new_stock,
            })
            .collect();

        Ok((lines, debits))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
