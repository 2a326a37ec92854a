//! # Error Types
//!
//! Domain-specific error types for nexus-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Kinds                                     │
//! │                                                                         │
//! │  InvalidArgument  ── ValidationError (nil id, blank SKU, unset hash)   │
//! │  NotFound         ── ProductNotFound, EntryNotFound                    │
//! │  BusinessRule     ── NonPositiveQuantity, InsufficientStock,           │
//! │                      QuantityOverflow                                  │
//! │  Integrity        ── ChainBroken, ReceiptHashMismatch                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError (register binary)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is retried by the core. The caller decides whether to
//! restock and try again or abandon the sale.

use thiserror::Error;
use uuid::Uuid;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    /// A ledger has no entry for the product.
    ///
    /// ## When This Occurs
    /// - Reading stock for a product that was never stocked
    /// - Reading a cart quantity for a product that was never scanned
    #[error("No entry found for product {product_id}")]
    EntryNotFound { product_id: Uuid },

    /// A cart line carries zero or a negative quantity into a sale.
    #[error("Cart contains non-positive quantity {quantity} for product {product_id}")]
    NonPositiveQuantity { product_id: Uuid, quantity: i64 },

    /// Insufficient stock to complete sale.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart: KAF-01 × 5
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { sku: "KAF-01", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Register shows: "Only 3 KAF-01 in stock"
    /// ```
    #[error("Insufficient stock for {sku}: available {available}, requested {requested}")]
    InsufficientStock {
        sku: String,
        available: i64,
        requested: i64,
    },

    /// A quantity, stock level or amount for this product leaves the `i64`
    /// range.
    #[error("Quantity or amount out of range for product {product_id}")]
    QuantityOverflow { product_id: Uuid },

    /// A receipt does not point at its predecessor's hash.
    #[error("Receipt chain broken at position {position}: expected previous hash {expected}, found {found}")]
    ChainBroken {
        position: usize,
        expected: String,
        found: String,
    },

    /// A stored receipt hash no longer matches the receipt content.
    #[error("Receipt hash mismatch for transaction {transaction_id}")]
    ReceiptHashMismatch { transaction_id: Uuid },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Coarse classification of a [`CoreError`].
///
/// Lets a caller tell "you passed garbage" apart from "the sale can't go
/// through" without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed input. A caller bug, never a business state.
    InvalidArgument,
    /// The referenced product or ledger entry does not exist.
    NotFound,
    /// The request is well-formed but breaks a sale rule.
    BusinessRule,
    /// The receipt chain has been tampered with or reordered.
    Integrity,
}

impl CoreError {
    /// Returns the kind of failure this error represents.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Validation(_) => ErrorKind::InvalidArgument,
            CoreError::ProductNotFound(_) | CoreError::EntryNotFound { .. } => ErrorKind::NotFound,
            CoreError::NonPositiveQuantity { .. }
            | CoreError::InsufficientStock { .. }
            | CoreError::QuantityOverflow { .. } => ErrorKind::BusinessRule,
            CoreError::ChainBroken { .. } | CoreError::ReceiptHashMismatch { .. } => {
                ErrorKind::Integrity
            }
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing, nil, or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., SKU already owned by another product).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
