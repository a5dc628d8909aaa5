//! Cartkeeper Cart - Stock-checked shopping cart with local persistence.
//!
//! # Architecture
//!
//! - [`CartStore`] owns the authoritative cart and is the only thing that
//!   mutates it. Every mutation is checked against live stock from an
//!   [`InventoryGateway`] and written to [`CartStorage`] once committed.
//! - The inventory service is the source of truth for stock. Stock levels are
//!   never cached; product metadata is cached by the HTTP gateway via `moka`.
//! - Failures are reported twice: as a typed [`CartError`] to the caller and
//!   as a user-facing [`Notice`] to the configured [`Notifier`].
//!
//! # Example
//!
//! ```rust,ignore
//! use cartkeeper_cart::{CartConfig, CartStore, FileStorage, HttpInventoryGateway, TracingNotifier};
//!
//! let config = CartConfig::from_env()?;
//! let gateway = HttpInventoryGateway::new(&config)?;
//! let storage = FileStorage::new(&config.storage_dir);
//! let store = CartStore::open(gateway, storage, TracingNotifier);
//!
//! store.add_product(ProductId::new(1)).await?;
//! let snapshot = store.snapshot().await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod gateway;
pub mod notify;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError};
pub use error::{CartError, GatewayError, StorageError};
pub use gateway::{HttpInventoryGateway, InventoryGateway};
pub use notify::{Notice, Notifier, TracingNotifier};
pub use storage::{CART_STORAGE_KEY, CartStorage, FileStorage, MemoryStorage};
pub use store::{CartSnapshot, CartStore};
