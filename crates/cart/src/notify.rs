//! User-facing notifications for rejected cart operations.

use std::fmt;
use std::sync::Arc;

use cartkeeper_core::ProductId;

/// A message to show the user after a cart operation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Adding a product failed for a reason other than stock.
    AddFailed(ProductId),
    /// The requested quantity is more than is in stock.
    StockExceeded(ProductId),
    /// Removing a product failed.
    RemoveFailed(ProductId),
    /// Changing a product's quantity failed for a reason other than stock.
    UpdateFailed(ProductId),
}

impl Notice {
    /// Text shown to the user.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::AddFailed(_) => "Could not add the product to the cart",
            Self::StockExceeded(_) => "Requested quantity is out of stock",
            Self::RemoveFailed(_) => "Could not remove the product from the cart",
            Self::UpdateFailed(_) => "Could not update the product quantity",
        }
    }

    /// Product the notice refers to.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        match self {
            Self::AddFailed(id)
            | Self::StockExceeded(id)
            | Self::RemoveFailed(id)
            | Self::UpdateFailed(id) => *id,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Displays notices to the user (toast, status line, terminal...).
///
/// Called synchronously at the point of failure.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Logs notices as `tracing` warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        tracing::warn!(product_id = %notice.product_id(), "{}", notice.message());
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}
