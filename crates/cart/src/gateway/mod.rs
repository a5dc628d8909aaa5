//! Inventory service access.
//!
//! # Architecture
//!
//! - [`InventoryGateway`] is the seam between the cart store and the remote
//!   inventory/catalog service; the store never talks HTTP itself
//! - [`HttpInventoryGateway`] is the production implementation (`reqwest`)
//! - Stock is always fetched live; product metadata may be cached
//!
//! # Example
//!
//! ```rust,ignore
//! use cartkeeper_cart::{CartConfig, HttpInventoryGateway, InventoryGateway};
//!
//! let gateway = HttpInventoryGateway::new(&CartConfig::from_env()?)?;
//! let stock = gateway.get_stock(ProductId::new(1)).await?;
//! ```

mod cache;
mod http;

use std::future::Future;

use cartkeeper_core::{Product, ProductId, StockRecord};

use crate::error::GatewayError;

pub use http::HttpInventoryGateway;

/// Read-only view of the remote inventory service.
///
/// Implementations must not cache [`StockRecord`]s: the cart checks every
/// mutation against the current stock level.
pub trait InventoryGateway: Send + Sync {
    /// Current stock level for a product.
    fn get_stock(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<StockRecord, GatewayError>> + Send;

    /// Catalog metadata for a product.
    fn get_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Product, GatewayError>> + Send;

    /// Every product in the catalog.
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, GatewayError>> + Send;
}
