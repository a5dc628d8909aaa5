//! Cart commands.
//!
//! Rejections are reported to the user by the store's notifier, so these
//! commands only translate the result into an [`Outcome`].

use cartkeeper_cart::{CartError, CartStore, InventoryGateway};
use cartkeeper_core::ProductId;

use super::Outcome;
use crate::output;

/// Print the cart.
pub async fn show<G: InventoryGateway>(store: &CartStore<G>) -> Outcome {
    output::print_cart(&store.cart().await);
    Outcome::Done
}

/// Add one unit of a product and print the cart.
pub async fn add<G: InventoryGateway>(store: &CartStore<G>, id: ProductId) -> Outcome {
    finish(store, store.add_product(id).await).await
}

/// Remove a product and print the cart.
pub async fn remove<G: InventoryGateway>(store: &CartStore<G>, id: ProductId) -> Outcome {
    finish(store, store.remove_product(id).await).await
}

/// Set a product's quantity and print the cart.
pub async fn update<G: InventoryGateway>(
    store: &CartStore<G>,
    id: ProductId,
    amount: i64,
) -> Outcome {
    finish(store, store.update_product_amount(id, amount).await).await
}

async fn finish<G: InventoryGateway>(
    store: &CartStore<G>,
    result: Result<(), CartError>,
) -> Outcome {
    match result {
        Ok(()) => {
            output::print_cart(&store.cart().await);
            Outcome::Done
        }
        Err(e) => {
            tracing::debug!(error = %e, "Cart command rejected");
            Outcome::Rejected
        }
    }
}
