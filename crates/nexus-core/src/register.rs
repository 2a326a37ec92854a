//! # Register
//!
//! Shared sale state for one store: catalog, inventory and receipt history
//! behind a single lock.
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Checkout A                         Checkout B                          │
//! │  ──────────                         ──────────                          │
//! │  lock ─────────────────┐                                                │
//! │  prev = last_hash()    │            lock ... (waits)                    │
//! │  read stock, debit     │                                                │
//! │  history.add(tx)       │                                                │
//! │  unlock ───────────────┘            prev = A's hash                     │
//! │                                     read stock (already debited)        │
//! │                                     ...                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Stock check-then-debit and read-hash-then-append both happen under the
//! same lock, so two checkouts can neither oversell nor fork the chain.
//!
//! Wrap in `Arc<Register>` to share between threads.

use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::cart::Cart;
use crate::catalog::ProductCatalog;
use crate::engine::PosEngine;
use crate::error::CoreResult;
use crate::history::TransactionHistory;
use crate::inventory::Inventory;
use crate::transaction::Transaction;

/// Everything a checkout reads or writes.
#[derive(Debug, Clone, Default)]
pub struct RegisterState {
    pub catalog: ProductCatalog,
    pub inventory: Inventory,
    pub history: TransactionHistory,
}

/// Lock-guarded [`RegisterState`].
#[derive(Debug, Default)]
pub struct Register {
    state: Mutex<RegisterState>,
}

impl Register {
    pub fn new(catalog: ProductCatalog, inventory: Inventory, history: TransactionHistory) -> Self {
        Register {
            state: Mutex::new(RegisterState {
                catalog,
                inventory,
                history,
            }),
        }
    }

    /// Stock is only written after a sale fully validates, so state behind a
    /// poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, RegisterState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Rings up `cart`: creates a transaction chained onto the latest
    /// receipt, debits stock, and records it in the history.
    pub fn checkout(&self, cart: &Cart) -> CoreResult<Transaction> {
        let mut guard = self.lock();
        let state = &mut *guard;

        debug!(lines = cart.len(), "Checkout started");

        let previous_hash = state.history.last_hash().to_string();
        let transaction = PosEngine::new(&state.catalog, &mut state.inventory)
            .create_transaction(cart, Some(&previous_hash))?;

        state.history.add(transaction.clone())?;
        Ok(transaction)
    }

    /// Executes a function with read access to the state.
    ///
    /// ## Usage
    /// ```rust
    /// use nexus_core::Register;
    ///
    /// let register = Register::default();
    /// let receipts = register.with_state(|s| s.history.len());
    /// assert_eq!(receipts, 0);
    /// ```
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&RegisterState) -> R,
    {
        let guard = self.lock();
        f(&guard)
    }

    /// Executes a function with write access to the state (adding products,
    /// restocking).
    pub fn with_state_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut RegisterState) -> R,
    {
        let mut guard = self.lock();
        f(&mut guard)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
