//! # Product Catalog
//!
//! Authoritative set of sellable products, reachable by id and by SKU.
//!
//! ## Dual-Map Invariant
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   by_id:  Uuid ───────────────► Product { id, sku, ... }               │
//! │   by_sku: "KAF-01" (upper) ───► Uuid                                   │
//! │                                                                         │
//! │   Every key in by_sku resolves to a product whose SKU matches it.      │
//! │   Both maps change together inside one &mut self call, so no caller    │
//! │   can observe them out of step.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use crate::error::{CoreResult, ValidationError};
use crate::product::Product;
use crate::validation::{validate_product_id, validate_sku};

/// Case-insensitive SKU key.
fn sku_key(sku: &str) -> String {
    sku.to_uppercase()
}

/// Products keyed by id, with a secondary SKU index.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    by_id: HashMap<Uuid, Product>,
    by_sku: HashMap<String, Uuid>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product, or replaces the product with the same id.
    ///
    /// ## Errors
    /// - [`ValidationError::Required`] if the id is nil or the SKU is blank
    /// - [`ValidationError::Duplicate`] if the SKU already belongs to a
    ///   different product
    ///
    /// Replacing a product under a new SKU unlinks the old SKU, so it no
    /// longer resolves.
    pub fn add_product(&mut self, product: Product) -> CoreResult<()> {
        validate_product_id(product.id)?;
        validate_sku(&product.sku)?;

        let key = sku_key(&product.sku);
        if let Some(owner) = self.by_sku.get(&key) {
            if *owner != product.id {
                return Err(ValidationError::Duplicate {
                    field: "sku".to_string(),
                    value: product.sku,
                }
                .into());
            }
        }

        if let Some(existing) = self.by_id.get(&product.id) {
            self.by_sku.remove(&sku_key(&existing.sku));
        }

        debug!(id = %product.id, sku = %product.sku, "Adding product to catalog");
        self.by_sku.insert(key, product.id);
        self.by_id.insert(product.id, product);
        Ok(())
    }

    /// Removes a product from both indexes. No-op if absent.
    pub fn remove_product(&mut self, id: Uuid) {
        if let Some(product) = self.by_id.remove(&id) {
            self.by_sku.remove(&sku_key(&product.sku));
        }
    }

    pub fn get_by_id(&self, id: Uuid) -> Option<&Product> {
        self.by_id.get(&id)
    }

    /// Case-insensitive SKU lookup. A blank SKU finds nothing.
    pub fn get_by_sku(&self, sku: &str) -> Option<&Product> {
        if sku.trim().is_empty() {
            return None;
        }
        self.by_sku
            .get(&sku_key(sku))
            .and_then(|id| self.by_id.get(id))
    }

    pub fn contains_sku(&self, sku: &str) -> bool {
        self.get_by_sku(sku).is_some()
    }

    pub fn contains_id(&self, id: Uuid) -> bool {
        self.by_id.contains_key(&id)
    }

    /// All products, in no particular order.
    pub fn products(&self) -> impl Iterator<Item = &Product> + '_ {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_id.clear();
        self.by_sku.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ErrorKind};
    use crate::money::Money;

    fn espresso() -> Product {
        Product::new("KAF-01", "Espresso", Money::from_cents(250), 1)
    }

    #[test]
    fn test_lookup_by_id_and_sku() {
        let mut catalog = ProductCatalog::new();
        let product = espresso();
        catalog.add_product(product.clone()).unwrap();

        assert_eq!(catalog.get_by_id(product.id), Some(&product));
        assert_eq!(catalog.get_by_sku("KAF-01"), Some(&product));

        let other = Product::new("TEE-01", "Green Tea", Money::from_cents(180), 1);
        catalog.add_product(other.clone()).unwrap();

        assert_eq!(catalog.get_by_sku("KAF-01"), Some(&product));
        assert_eq!(catalog.get_by_id(product.id), Some(&product));
        assert_eq!(catalog.get_by_sku("TEE-01"), Some(&other));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_sku_lookup_is_case_insensitive() {
        let mut catalog = ProductCatalog::new();
        let product = espresso();
        catalog.add_product(product.clone()).unwrap();

        assert_eq!(catalog.get_by_sku("kaf-01"), Some(&product));
        assert!(catalog.contains_sku("Kaf-01"));
    }

    #[test]
    fn test_blank_sku_lookup_is_not_found() {
        let mut catalog = ProductCatalog::new();
        catalog.add_product(espresso()).unwrap();

        assert!(catalog.get_by_sku("").is_none());
        assert!(catalog.get_by_sku("   ").is_none());
        assert!(!catalog.contains_sku(""));
    }

    #[test]
    fn test_readding_with_new_sku_unlinks_old_sku() {
        let mut catalog = ProductCatalog::new();
        let product = espresso();
        catalog.add_product(product.clone()).unwrap();

        let renamed = Product {
            sku: "KAF-99".to_string(),
            ..product.clone()
        };
        catalog.add_product(renamed.clone()).unwrap();

        assert!(catalog.get_by_sku("KAF-01").is_none());
        assert_eq!(catalog.get_by_sku("KAF-99"), Some(&renamed));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_readding_same_sku_replaces_attributes() {
        let mut catalog = ProductCatalog::new();
        let product = espresso();
        catalog.add_product(product.clone()).unwrap();

        let repriced = Product {
            price: Money::from_cents(270),
            ..product.clone()
        };
        catalog.add_product(repriced).unwrap();

        assert_eq!(
            catalog.get_by_sku("KAF-01").unwrap().price,
            Money::from_cents(270)
        );
    }

    #[test]
    fn test_rejects_invalid_identity() {
        let mut catalog = ProductCatalog::new();

        let nil_id = Product::with_id(Uuid::nil(), "KAF-01", "Espresso", Money::zero(), 1);
        let err = catalog.add_product(nil_id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let blank_sku = Product::new("  ", "Espresso", Money::zero(), 1);
        let err = catalog.add_product(blank_sku).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        assert!(catalog.is_empty());
    }

    #[test]
    fn test_rejects_sku_owned_by_another_product() {
        let mut catalog = ProductCatalog::new();
        let product = espresso();
        catalog.add_product(product.clone()).unwrap();

        let clash = Product::new("kaf-01", "Imposter", Money::zero(), 1);
        let err = catalog.add_product(clash.clone()).unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
        assert_eq!(catalog.get_by_sku("KAF-01"), Some(&product));
        assert!(!catalog.contains_id(clash.id));
    }

    #[test]
    fn test_remove_product_updates_both_maps() {
        let mut catalog = ProductCatalog::new();
        let product = espresso();
        catalog.add_product(product.clone()).unwrap();

        catalog.remove_product(product.id);
        catalog.remove_product(product.id);

        assert!(!catalog.contains_id(product.id));
        assert!(!catalog.contains_sku("KAF-01"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_products_and_clear() {
        let mut catalog = ProductCatalog::new();
        catalog.add_product(espresso()).unwrap();
        catalog
            .add_product(Product::new("TEE-01", "Green Tea", Money::from_cents(180), 1))
            .unwrap();

        let mut skus: Vec<&str> = catalog.products().map(|p| p.sku.as_str()).collect();
        skus.sort();
        assert_eq!(skus, vec!["KAF-01", "TEE-01"]);

        catalog.clear();
        assert_eq!(catalog.len(), 0);
        assert!(catalog.get_by_sku("TEE-01").is_none());
    }
}
