//! # Transaction History
//!
//! Append-only record of issued receipts, and the source of the "previous
//! hash" each new sale chains onto.
//!
//! ```text
//!   seed ◄── tx1.prev    tx1.hash ◄── tx2.prev    tx2.hash ◄── tx3.prev
//!                                                              │
//!                                         last_hash() ─────────┘ tx3.hash
//! ```

use tracing::info;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::transaction::Transaction;
use crate::validation::validate_receipt_hash;

/// Chain seed used when no receipt has been issued yet.
pub const DEFAULT_SEED_HASH: &str = "0000000000000000";

/// Ordered, append-only list of transactions.
#[derive(Debug, Clone)]
pub struct TransactionHistory {
    seed_hash: String,
    transactions: Vec<Transaction>,
}

impl Default for TransactionHistory {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED_HASH)
    }
}

impl TransactionHistory {
    /// Empty history seeded with [`DEFAULT_SEED_HASH`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty history with a custom chain seed.
    pub fn with_seed(seed_hash: impl Into<String>) -> Self {
        TransactionHistory {
            seed_hash: seed_hash.into(),
            transactions: Vec::new(),
        }
    }

    pub fn seed_hash(&self) -> &str {
        &self.seed_hash
    }

    /// Appends a transaction.
    ///
    /// ## Errors
    /// The current receipt hash must be non-empty hexadecimal, as produced
    /// by [`crate::receipt_hash::receipt_hash`]. An empty hash is
    /// [`ValidationError::Required`], any other text (a foreign hash format
    /// included) is [`ValidationError::InvalidFormat`].
    ///
    /// [`ValidationError::Required`]: crate::error::ValidationError::Required
    /// [`ValidationError::InvalidFormat`]: crate::error::ValidationError::InvalidFormat
    pub fn add(&mut self, transaction: Transaction) -> CoreResult<()> {
        validate_receipt_hash(transaction.current_receipt_hash())?;

        info!(
            transaction_id = %transaction.id(),
            position = self.transactions.len(),
            "Transaction recorded"
        );
        self.transactions.push(transaction);
        Ok(())
    }

    /// Hash the next sale should chain onto.
    pub fn last_hash(&self) -> &str {
        self.transactions
            .last()
            .map_or(self.seed_hash.as_str(), Transaction::current_receipt_hash)
    }

    /// All transactions in append order. Call again to restart.
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> + '_ {
        self.transactions.iter()
    }

    pub fn find(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id() == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Walks the whole history and checks every link and every digest.
    ///
    /// ## Errors
    /// - [`CoreError::ChainBroken`] if a receipt's previous hash is not its
    ///   predecessor's hash (or the seed, for the first one)
    /// - [`CoreError::ReceiptHashMismatch`] if a receipt's content changed
    pub fn verify_chain(&self) -> CoreResult<()> {
        let mut expected = self.seed_hash.as_str();

        for (position, tx) in self.transactions.iter().enumerate() {
            if tx.previous_receipt_hash() != expected {
                return Err(CoreError::ChainBroken {
                    position,
                    expected: expected.to_string(),
                    found: tx.previous_receipt_hash().to_string(),
                });
            }
            tx.verify_hash()?;
            expected = tx.current_receipt_hash();
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::catalog::ProductCatalog;
    use crate::engine::PosEngine;
    use crate::error::{ErrorKind, ValidationError};
    use crate::inventory::Inventory;
    use crate::money::Money;
    use crate::product::Product;

    /// Rings up `count` single-espresso sales, each chained onto the last.
    fn history_with_sales(count: usize) -> TransactionHistory {
        let mut catalog = ProductCatalog::new();
        let mut inventory = Inventory::new();
        let espresso = Product::new("KAF-01", "Espresso", Money::from_cents(250), 1);
        catalog.add_product(espresso.clone()).unwrap();
        inventory.set_stock(espresso.id, 100);

        let mut cart = Cart::new();
        cart.set_item_quantity(espresso.id, 1);

        let mut history = TransactionHistory::new();
        let mut engine = PosEngine::new(&catalog, &mut inventory);
        for _ in 0..count {
            let tx = engine
                .create_transaction(&cart, Some(history.last_hash()))
                .unwrap();
            history.add(tx).unwrap();
        }
        history
    }

    /// Round-trips a transaction through JSON with one field rewritten.
    fn edited(tx: &Transaction, field: &str, value: serde_json::Value) -> Transaction {
        let mut json = serde_json::to_value(tx).unwrap();
        json[field] = value;
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_empty_history_returns_seed() {
        let history = TransactionHistory::new();
        assert_eq!(history.last_hash(), "0000000000000000");
        assert!(history.is_empty());
        assert!(history.verify_chain().is_ok());

        let custom = TransactionHistory::with_seed("abcdef");
        assert_eq!(custom.last_hash(), "abcdef");
    }

    #[test]
    fn test_last_hash_follows_latest_transaction() {
        let history = history_with_sales(1);
        let tx = history.transactions().next().unwrap();

        assert_eq!(history.last_hash(), tx.current_receipt_hash());
        assert_eq!(tx.previous_receipt_hash(), DEFAULT_SEED_HASH);
    }

    #[test]
    fn test_transactions_are_in_append_order_and_chained() {
        let history = history_with_sales(3);

        let txs: Vec<&Transaction> = history.transactions().collect();
        assert_eq!(txs.len(), 3);
        assert_eq!(txs[1].previous_receipt_hash(), txs[0].current_receipt_hash());
        assert_eq!(txs[2].previous_receipt_hash(), txs[1].current_receipt_hash());
        assert_eq!(history.last_hash(), txs[2].current_receipt_hash());
        assert_eq!(history.transactions().count(), 3);

        assert!(history.verify_chain().is_ok());
        assert_eq!(history.find(txs[1].id()), Some(txs[1]));
        assert!(history.find(Uuid::now_v7()).is_none());
    }

    #[test]
    fn test_rejects_transaction_without_receipt_hash() {
        let history = history_with_sales(1);
        let tx = history.transactions().next().unwrap();
        let unsealed = edited(tx, "current_receipt_hash", "".into());

        let mut fresh = TransactionHistory::new();
        let err = fresh.add(unsealed).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(fresh.is_empty());
    }

    #[test]
    fn test_rejects_non_hex_receipt_hash() {
        let history = history_with_sales(1);
        let tx = history.transactions().next().unwrap();
        let foreign = edited(tx, "current_receipt_hash", "sha256:abc123".into());

        let mut fresh = TransactionHistory::new();
        let err = fresh.add(foreign).unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidFormat { .. })
        ));
        assert!(fresh.is_empty());
    }

    #[test]
    fn test_verify_chain_detects_reordering() {
        let history = history_with_sales(2);
        let txs: Vec<Transaction> = history.transactions().cloned().collect();

        let mut reordered = TransactionHistory::new();
        reordered.add(txs[1].clone()).unwrap();
        reordered.add(txs[0].clone()).unwrap();

        assert!(matches!(
            reordered.verify_chain(),
            Err(CoreError::ChainBroken { position: 0, .. })
        ));
    }

    #[test]
    fn test_verify_chain_detects_edited_receipt() {
        let history = history_with_sales(2);
        let txs: Vec<Transaction> = history.transactions().cloned().collect();

        let mut lines = serde_json::to_value(txs[0].lines()).unwrap();
        lines[0]["unit_price"] = 1.into();
        let forged = edited(&txs[0], "lines", lines);

        let mut tampered = TransactionHistory::new();
        tampered.add(forged).unwrap();
        tampered.add(txs[1].clone()).unwrap();

        let err = tampered.verify_chain().unwrap_err();
        assert!(matches!(
            err,
            CoreError::ReceiptHashMismatch { transaction_id } if transaction_id == txs[0].id()
        ));
        assert_eq!(err.kind(), ErrorKind::Integrity);
    }
}
