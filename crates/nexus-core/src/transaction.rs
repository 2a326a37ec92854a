//! # Transaction & Sale Line
//!
//! The immutable result of a sale.
//!
//! ## Snapshot Pattern
//! Product details (sku, name, price, tax category) are copied by value into
//! each [`SaleLine`]. Editing or deleting the product afterwards never
//! changes a receipt that was already issued.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::product::Product;
use crate::receipt_hash::receipt_hash;

// =============================================================================
// Sale Line
// =============================================================================

/// One product sold, frozen at the moment of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleLine {
    #[ts(as = "String")]
    pub product_id: Uuid,
    /// SKU at time of sale (frozen).
    pub sku: String,
    /// Product name at time of sale (frozen).
    pub name: String,
    /// Unit price at time of sale (frozen).
    pub unit_price: Money,
    /// Tax category at time of sale (frozen).
    pub tax_category_id: u32,
    pub quantity: i64,
}

impl SaleLine {
    /// Copies the product's current attributes into a new line.
    pub fn snapshot(product: &Product, quantity: i64) -> Self {
        SaleLine {
            product_id: product.id,
            sku: product.sku.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            tax_category_id: product.tax_category_id,
            quantity,
        }
    }

    /// Line total (unit price × quantity).
    pub fn total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A finalized sale.
///
/// Only the sale engine creates these. Both hashes are fixed when the
/// transaction is sealed; there is no setter for any field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Transaction {
    #[ts(as = "String")]
    id: Uuid,
    #[ts(as = "String")]
    timestamp: DateTime<Utc>,
    lines: Vec<SaleLine>,
    previous_receipt_hash: String,
    current_receipt_hash: String,
    /// Reserved for an external signer. This crate never fills it in.
    signature: Option<String>,
}

impl Transaction {
    /// Assigns identity and time to a finished set of lines and computes the
    /// chained receipt hash.
    pub(crate) fn seal(previous_receipt_hash: String, lines: Vec<SaleLine>) -> Self {
        let id = Uuid::now_v7();
        let timestamp = Utc::now();
        let current_receipt_hash = receipt_hash(&previous_receipt_hash, id, &timestamp, &lines);

        Transaction {
            id,
            timestamp,
            lines,
            previous_receipt_hash,
            current_receipt_hash,
            signature: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Sale lines in the order they were processed.
    pub fn lines(&self) -> &[SaleLine] {
        &self.lines
    }

    pub fn previous_receipt_hash(&self) -> &str {
        &self.previous_receipt_hash
    }

    pub fn current_receipt_hash(&self) -> &str {
        &self.current_receipt_hash
    }

    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    /// Sum of all line totals.
    pub fn grand_total(&self) -> Money {
        self.lines.iter().map(SaleLine::total).sum()
    }

    /// Recomputes the receipt hash from the current content.
    pub fn compute_receipt_hash(&self) -> String {
        receipt_hash(
            &self.previous_receipt_hash,
            self.id,
            &self.timestamp,
            &self.lines,
        )
    }

    /// Checks that the stored receipt hash still matches the content.
    ///
    /// ## Errors
    /// [`CoreError::ReceiptHashMismatch`] if anything hashed has changed.
    pub fn verify_hash(&self) -> CoreResult<()> {
        if self.compute_receipt_hash() != self.current_receipt_hash {
            return Err(CoreError::ReceiptHashMismatch {
                transaction_id: self.id,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
