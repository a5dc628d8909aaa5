//! Catalog listing.

use cartkeeper_cart::{CartStore, InventoryGateway};
use tracing::instrument;

use super::{CliError, Outcome};
use crate::output;

/// Print every catalog product with its quantity in the cart.
///
/// # Errors
///
/// Returns `CliError::Gateway` if the catalog cannot be fetched.
#[instrument(skip(store))]
pub async fn list<G: InventoryGateway>(store: &CartStore<G>) -> Result<Outcome, CliError> {
    let products = store.gateway().list_products().await?;
    let snapshot = store.snapshot().await;

    output::print_catalog(&products, &snapshot);
    Ok(Outcome::Done)
}
