//! # Validation Module
//!
//! Identity checks applied before anything enters the catalog or the
//! transaction history.
//!
//! ## Usage
//! ```rust
//! use nexus_core::validation::{validate_product_id, validate_sku};
//! use uuid::Uuid;
//!
//! assert!(validate_sku("KAF-01").is_ok());
//! assert!(validate_sku("   ").is_err());
//! assert!(validate_product_id(Uuid::nil()).is_err());
//! ```

use uuid::Uuid;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Rejects the nil UUID, which is never a real product identity.
pub fn validate_product_id(id: Uuid) -> ValidationResult<()> {
    if id.is_nil() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    Ok(())
}

/// Validates a SKU (stock-keeping code).
///
/// ## Rules
/// - Must contain at least one non-whitespace character
///
/// Any other text is accepted as-is; lookups are case-insensitive.
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    if sku.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    Ok(())
}

/// Validates that a receipt hash has been assigned.
pub fn validate_receipt_hash(hash: &str) -> ValidationResult<()> {
    if hash.is_empty() {
        return Err(ValidationError::Required {
            field: "current_receipt_hash".to_string(),
        });
    }

    if !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidFormat {
            field: "current_receipt_hash".to_string(),
            reason: "must be hexadecimal".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("KAF-01").is_ok());
        assert!(validate_sku("has space").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("\t\n").is_err());
    }

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id(Uuid::now_v7()).is_ok());
        assert!(validate_product_id(Uuid::nil()).is_err());
    }

    #[test]
    fn test_validate_receipt_hash() {
        assert!(validate_receipt_hash("0000000000000000").is_ok());
        assert!(validate_receipt_hash("deadBEEF").is_ok());

        assert!(validate_receipt_hash("").is_err());
        assert!(validate_receipt_hash("not-hex").is_err());
    }
}
