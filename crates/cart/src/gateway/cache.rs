//! Cache types for catalog responses.
//!
//! Only catalog metadata lives here; stock records are never cached.

use cartkeeper_core::{Product, ProductId};

/// Cache key for catalog lookups.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(ProductId),
    Catalog,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Catalog(Vec<Product>),
}
