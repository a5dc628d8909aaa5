//! Catalog records returned by the inventory service.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Catalog metadata for a product.
///
/// Extra fields sent by the service are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    /// Image URL.
    pub image: String,
}

/// Live stock level for a product.
///
/// Always fetched fresh; never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: ProductId,
    /// Units currently available.
    pub amount: u32,
}

impl StockRecord {
    /// Whether `requested` units can be covered by this stock level.
    #[must_use]
    pub const fn covers(&self, requested: u32) -> bool {
        requested <= self.amount
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_ignores_unknown_fields() {
        let json = r#"{
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://example.com/shoe.jpg",
            "brand": "ignored"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Price::from_cents(17990));
    }

    #[test]
    fn test_stock_covers() {
        let stock = StockRecord {
            id: ProductId::new(1),
            amount: 5,
        };
        assert!(stock.covers(5));
        assert!(!stock.covers(6));
    }
}
