//! Error types for the cart store and its collaborators.
//!
//! Every mutation returns a [`CartError`] naming the specific failure kind.
//! Gateway and storage failures carry their own enums so callers can log the
//! underlying cause while users only see a generic message.

use cartkeeper_core::ProductId;
use thiserror::Error;

/// Why a cart mutation was rejected.
///
/// The cart is unchanged whenever one of these is returned.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested quantity is more than the inventory service has.
    #[error("Requested {requested} of product {product_id}, only {available} in stock")]
    StockExceeded {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },

    /// The product is not in the cart.
    #[error("Product {0} is not in the cart")]
    ItemNotFound(ProductId),

    /// Stock or product lookup failed.
    #[error("Inventory error: {0}")]
    Gateway(#[from] GatewayError),
}

impl CartError {
    /// Whether this is a stock-ceiling rejection.
    #[must_use]
    pub const fn is_stock_exceeded(&self) -> bool {
        matches!(self, Self::StockExceeded { .. })
    }
}

/// Errors that can occur when talking to the inventory service.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status.
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Errors reading or writing persisted cart state.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cart serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
