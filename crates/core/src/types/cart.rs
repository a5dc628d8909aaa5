//! The cart and its line items.
//!
//! A [`Cart`] is an immutable value: every update returns a new cart, leaving
//! the original untouched. Items keep first-add order and there is at most one
//! item per [`ProductId`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::product::Product;

/// A product in the cart together with its quantity.
///
/// Title, price and image are copied from the catalog when the item is first
/// added and are not refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    /// Quantity in the cart, always at least 1.
    pub amount: u32,
}

impl CartItem {
    /// Create a cart item from catalog metadata.
    #[must_use]
    pub fn from_product(product: Product, amount: u32) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount,
        }
    }

    /// Copy of this item with a different quantity.
    #[must_use]
    pub fn with_amount(&self, amount: u32) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }

    /// Line total (`price × amount`).
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price.times(self.amount)
    }
}

/// Ordered collection of cart items.
///
/// Serializes as a plain JSON array of items. Deserializing merges entries
/// that share a product ID, keeping the last one, and drops zero-quantity
/// entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// Items in first-add order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Find the item for a product.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Quantity of a product in the cart, or 0 if absent.
    #[must_use]
    pub fn amount_of(&self, id: ProductId) -> u32 {
        self.find(id).map_or(0, |item| item.amount)
    }

    /// Product ID to quantity mapping, used for "in cart" badges.
    #[must_use]
    pub fn amounts(&self) -> HashMap<ProductId, u32> {
        self.items.iter().map(|item| (item.id, item.amount)).collect()
    }

    /// Sum of all item quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// New cart with `item` replacing the entry with the same ID, or appended
    /// if there is none. Position of an existing entry is preserved.
    #[must_use]
    pub fn with_item(&self, item: CartItem) -> Self {
        let mut items = Vec::with_capacity(self.items.len() + 1);
        let mut pending = Some(item);

        for existing in &self.items {
            match pending.take_if(|candidate| candidate.id == existing.id) {
                Some(replacement) => items.push(replacement),
                None => items.push(existing.clone()),
            }
        }
        items.extend(pending);

        Self { items }
    }

    /// New cart without the entry for `id`, or `None` if it is not present.
    #[must_use]
    pub fn without(&self, id: ProductId) -> Option<Self> {
        self.find(id)?;
        Some(Self {
            items: self
                .items
                .iter()
                .filter(|item| item.id != id)
                .cloned()
                .collect(),
        })
    }
}

impl FromIterator<CartItem> for Cart {
    /// Later items with an already-seen ID replace the earlier entry.
    fn from_iter<T: IntoIterator<Item = CartItem>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |cart, item| cart.with_item(item))
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        items.into_iter().filter(|item| item.amount > 0).collect()
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: i32, amount: u32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::from_cents(1000),
            image: format!("https://example.com/{id}.jpg"),
            amount,
        }
    }

    #[test]
    fn test_with_item_appends_new_products_in_order() {
        let cart = Cart::empty().with_item(item(2, 1)).with_item(item(1, 1));
        let ids: Vec<i32> = cart.items().iter().map(|i| i.id.as_i32()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_with_item_replaces_in_place() {
        let cart = Cart::empty()
            .with_item(item(1, 1))
            .with_item(item(2, 1))
            .with_item(item(3, 1));
        let updated = cart.with_item(item(2, 4));

        assert_eq!(updated.len(), 3);
        assert_eq!(updated.items()[1], item(2, 4));
        // Original is untouched.
        assert_eq!(cart.amount_of(ProductId::new(2)), 1);
    }

    #[test]
    fn test_without() {
        let cart = Cart::empty().with_item(item(1, 3)).with_item(item(2, 1));

        let removed = cart.without(ProductId::new(1)).unwrap();
        assert_eq!(removed.items(), &[item(2, 1)]);
        assert!(cart.without(ProductId::new(9)).is_none());
    }

    #[test]
    fn test_amounts_and_totals() {
        let cart = Cart::empty().with_item(item(1, 3)).with_item(item(2, 2));

        let amounts = cart.amounts();
        assert_eq!(amounts.get(&ProductId::new(1)), Some(&3));
        assert_eq!(amounts.get(&ProductId::new(2)), Some(&2));
        assert_eq!(cart.amount_of(ProductId::new(3)), 0);
        assert_eq!(cart.total_quantity(), 5);
        assert_eq!(cart.subtotal(), Price::from_cents(5000));
    }

    #[test]
    fn test_from_iter_merges_duplicate_ids() {
        let cart: Cart = vec![item(1, 1), item(2, 1), item(1, 3)].into_iter().collect();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.amount_of(ProductId::new(1)), 3);
    }

    #[test]
    fn test_cart_serializes_as_item_array() {
        let cart = Cart::empty().with_item(item(1, 2));
        let json = serde_json::to_value(&cart).unwrap();

        let array = json.as_array().unwrap();
        assert_eq!(array.len(), 1);
        assert_eq!(array[0]["id"], 1);
        assert_eq!(array[0]["amount"], 2);

        let restored: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(restored, cart);
    }
}
