//! # Catalog State
//!
//! The product list last fetched from the backend.
//!
//! A refresh builds the new list off to the side and swaps it in whole, so
//! readers see either the old catalog or the new one, never a mix.

use std::sync::{Arc, RwLock};

use tally_core::Product;

#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    products: Arc<RwLock<Arc<Vec<Product>>>>,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the catalog.
    pub fn replace(&self, products: Vec<Product>) {
        let next = Arc::new(products);
        let mut slot = self
            .products
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = next;
    }

    /// The current catalog. Cheap; shares the underlying list.
    pub fn snapshot(&self) -> Arc<Vec<Product>> {
        let slot = self
            .products
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&slot)
    }

    /// Looks a product up by id.
    pub fn find(&self, product_id: &str) -> Option<Product> {
        self.snapshot()
            .iter()
            .find(|product| product.id == product_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}
