//! The cart store: the single owner of the authoritative cart.
//!
//! # Invariants
//!
//! - At most one item per product ID, items in first-add order
//! - An item's amount never exceeds the stock level observed when it was set
//! - Mutations are all-or-nothing: the cart is replaced in a single commit
//!   after every check has passed, then persisted in full
//! - Mutations on one store run one at a time
//!
//! Readers take snapshots and never wait on inventory requests.

use std::collections::HashMap;
use std::sync::Arc;

use cartkeeper_core::{Cart, CartItem, ProductId};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use crate::error::{CartError, StorageError};
use crate::gateway::InventoryGateway;
use crate::notify::{Notice, Notifier};
use crate::storage::{CART_STORAGE_KEY, CartStorage};

/// Read-only view of the cart handed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartSnapshot {
    pub cart: Cart,
    /// Product ID to quantity, for "in cart" badges.
    pub amounts: HashMap<ProductId, u32>,
}

impl CartSnapshot {
    /// Quantity of a product in the cart, or 0 if absent.
    #[must_use]
    pub fn amount_of(&self, id: ProductId) -> u32 {
        self.amounts.get(&id).copied().unwrap_or(0)
    }
}

impl From<Cart> for CartSnapshot {
    fn from(cart: Cart) -> Self {
        let amounts = cart.amounts();
        Self { cart, amounts }
    }
}

/// Shopping cart checked against live stock and persisted after every change.
///
/// Construct once with [`CartStore::open`] and share by cloning; clones refer
/// to the same cart.
pub struct CartStore<G> {
    inner: Arc<CartStoreInner<G>>,
}

struct CartStoreInner<G> {
    gateway: G,
    storage: Box<dyn CartStorage>,
    notifier: Box<dyn Notifier>,
    cart: RwLock<Cart>,
    /// Held for the whole of a mutation.
    write_gate: Mutex<()>,
}

impl<G> Clone for CartStore<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G: InventoryGateway> CartStore<G> {
    /// Create the store, restoring the cart from `storage`.
    ///
    /// A missing, unreadable or corrupt stored cart yields an empty cart.
    pub fn open(
        gateway: G,
        storage: impl CartStorage + 'static,
        notifier: impl Notifier + 'static,
    ) -> Self {
        let cart = load_cart(&storage);

        Self {
            inner: Arc::new(CartStoreInner {
                gateway,
                storage: Box::new(storage),
                notifier: Box::new(notifier),
                cart: RwLock::new(cart),
                write_gate: Mutex::new(()),
            }),
        }
    }

    /// The inventory gateway this store checks against.
    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.inner.gateway
    }

    /// Current cart plus per-product amounts.
    pub async fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::from(self.cart().await)
    }

    /// Current cart.
    pub async fn cart(&self) -> Cart {
        self.inner.cart.read().await.clone()
    }

    /// Quantity of a product in the cart, or 0 if absent.
    pub async fn amount_in_cart(&self, id: ProductId) -> u32 {
        self.inner.cart.read().await.amount_of(id)
    }

    /// Add one unit of a product.
    ///
    /// New products are fetched from the catalog and appended with amount 1.
    ///
    /// # Errors
    ///
    /// - `CartError::StockExceeded` if one more unit would exceed stock
    /// - `CartError::Gateway` if the stock or product lookup fails
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn add_product(&self, id: ProductId) -> Result<(), CartError> {
        let _gate = self.inner.write_gate.lock().await;

        let outcome = self.build_add(id).await;
        self.finish(outcome, Notice::AddFailed(id)).await
    }

    /// Remove a product entirely.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if the product is not in the cart.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn remove_product(&self, id: ProductId) -> Result<(), CartError> {
        let _gate = self.inner.write_gate.lock().await;

        let outcome = self
            .cart()
            .await
            .without(id)
            .ok_or(CartError::ItemNotFound(id));
        self.finish(outcome, Notice::RemoveFailed(id)).await
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// An `amount` of zero or less does nothing; use
    /// [`remove_product`](Self::remove_product) to drop an item.
    ///
    /// # Errors
    ///
    /// - `CartError::StockExceeded` if `amount` exceeds stock
    /// - `CartError::ItemNotFound` if the product is not in the cart
    /// - `CartError::Gateway` if the stock lookup fails
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn update_product_amount(
        &self,
        id: ProductId,
        amount: i64,
    ) -> Result<(), CartError> {
        if amount <= 0 {
            debug!(amount, "Ignoring non-positive amount");
            return Ok(());
        }

        let _gate = self.inner.write_gate.lock().await;

        let outcome = self.build_update(id, amount).await;
        self.finish(outcome, Notice::UpdateFailed(id)).await
    }

    async fn build_add(&self, id: ProductId) -> Result<Cart, CartError> {
        let cart = self.cart().await;
        let existing = cart.find(id);

        let stock = self.inner.gateway.get_stock(id).await?;
        let candidate = existing.map_or(0, |item| item.amount).saturating_add(1);

        if !stock.covers(candidate) {
            return Err(CartError::StockExceeded {
                product_id: id,
                requested: u64::from(candidate),
                available: stock.amount,
            });
        }

        let item = match existing {
            Some(item) => item.with_amount(candidate),
            None => CartItem::from_product(self.inner.gateway.get_product(id).await?, 1),
        };

        Ok(cart.with_item(item))
    }

    async fn build_update(&self, id: ProductId, requested: i64) -> Result<Cart, CartError> {
        let stock = self.inner.gateway.get_stock(id).await?;

        // Anything past u32::MAX is beyond every possible stock level
        let Some(amount) = u32::try_from(requested)
            .ok()
            .filter(|amount| stock.covers(*amount))
        else {
            return Err(CartError::StockExceeded {
                product_id: id,
                requested: requested.unsigned_abs(),
                available: stock.amount,
            });
        };

        let cart = self.cart().await;
        let item = cart
            .find(id)
            .ok_or(CartError::ItemNotFound(id))?
            .with_amount(amount);

        Ok(cart.with_item(item))
    }

    /// Commit a successfully built cart, or report the failure.
    ///
    /// Stock rejections are always reported as [`Notice::StockExceeded`];
    /// every other error uses `failed`.
    async fn finish(
        &self,
        outcome: Result<Cart, CartError>,
        failed: Notice,
    ) -> Result<(), CartError> {
        match outcome {
            Ok(cart) => {
                self.commit(cart).await;
                Ok(())
            }
            Err(err) => {
                let notice = if err.is_stock_exceeded() {
                    Notice::StockExceeded(failed.product_id())
                } else {
                    failed
                };
                warn!(error = %err, "Cart operation rejected");
                self.inner.notifier.notify(notice);
                Err(err)
            }
        }
    }

    /// Replace the authoritative cart and persist it.
    ///
    /// Persistence is best-effort: a failed write is logged and the in-memory
    /// cart stays committed.
    async fn commit(&self, cart: Cart) {
        let mut current = self.inner.cart.write().await;
        *current = cart;

        match persist_cart(self.inner.storage.as_ref(), &current) {
            Ok(()) => debug!(
                items = current.len(),
                total_quantity = current.total_quantity(),
                "Cart committed"
            ),
            Err(e) => warn!(error = %e, "Failed to persist cart"),
        }
    }
}

/// Read the stored cart, falling back to empty.
fn load_cart(storage: &dyn CartStorage) -> Cart {
    let raw = match storage.read(CART_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::empty(),
        Err(e) => {
            warn!(error = %e, "Failed to read stored cart, starting empty");
            return Cart::empty();
        }
    };

    match serde_json::from_str::<Cart>(&raw) {
        Ok(cart) => {
            info!(items = cart.len(), "Restored cart from storage");
            cart
        }
        Err(e) => {
            warn!(error = %e, "Stored cart is corrupt, starting empty");
            Cart::empty()
        }
    }
}

fn persist_cart(storage: &dyn CartStorage, cart: &Cart) -> Result<(), StorageError> {
    let serialized = serde_json::to_string(cart)?;
    storage.write(CART_STORAGE_KEY, &serialized)
}
