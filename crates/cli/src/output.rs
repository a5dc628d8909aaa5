//! Terminal rendering for the catalog, the cart and notices.

#![allow(clippy::print_stdout, clippy::print_stderr)] // This module is the CLI's output

use std::fmt::Write;

use cartkeeper_cart::{CartSnapshot, Notice, Notifier};
use cartkeeper_core::{Cart, Product};

/// Prints notices to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        eprintln!("error: {notice} (product {})", notice.product_id());
    }
}

pub fn print_catalog(products: &[Product], snapshot: &CartSnapshot) {
    print!("{}", render_catalog(products, snapshot));
}

pub fn print_cart(cart: &Cart) {
    print!("{}", render_cart(cart));
}

/// One line per product: ID, price, quantity in cart, title.
fn render_catalog(products: &[Product], snapshot: &CartSnapshot) -> String {
    if products.is_empty() {
        return "Catalog is empty\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:>4}  {:>10}  {:>7}  TITLE", "ID", "PRICE", "IN CART");
    for product in products {
        let _ = writeln!(
            out,
            "{:>4}  {:>10}  {:>7}  {}",
            product.id,
            product.price.to_string(),
            snapshot.amount_of(product.id),
            product.title
        );
    }
    out
}

/// One line per item followed by quantity and subtotal.
fn render_cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Cart is empty\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:>5}  {:>10}  {:>10}  TITLE",
        "ID", "QTY", "PRICE", "SUBTOTAL"
    );
    for item in cart {
        let _ = writeln!(
            out,
            "{:>4}  {:>5}  {:>10}  {:>10}  {}",
            item.id,
            item.amount,
            item.price.to_string(),
            item.subtotal().to_string(),
            item.title
        );
    }
    let _ = writeln!(
        out,
        "{} item(s), total {}",
        cart.total_quantity(),
        cart.subtotal()
    );
    out
}

#[cfg(test)]
mod tests {
    use cartkeeper_core::{CartItem, Price, ProductId};

    use super::*;

    fn product(id: i32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Sneaker {id}"),
            price: Price::from_cents(cents),
            image: String::new(),
        }
    }

    #[test]
    fn test_render_catalog_shows_cart_badges() {
        let cart = Cart::empty().with_item(CartItem::from_product(product(2, 13990), 3));
        let snapshot = CartSnapshot::from(cart);

        let out = render_catalog(&[product(1, 17990), product(2, 13990)], &snapshot);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("$179.90"));
        assert!(lines[1].ends_with("0  Sneaker 1"));
        assert!(lines[2].ends_with("3  Sneaker 2"));
    }

    #[test]
    fn test_render_cart_totals() {
        let cart = Cart::empty()
            .with_item(CartItem::from_product(product(1, 1000), 2))
            .with_item(CartItem::from_product(product(2, 250), 1));

        let out = render_cart(&cart);

        assert!(out.contains("$20.00"));
        assert!(out.ends_with("3 item(s), total $22.50\n"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_cart(&Cart::empty()), "Cart is empty\n");
        assert_eq!(
            render_catalog(&[], &CartSnapshot::default()),
            "Catalog is empty\n"
        );
    }
}
