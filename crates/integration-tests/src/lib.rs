//! Integration tests for Cartkeeper.
//!
//! Each test runs the real [`HttpInventoryGateway`] against a `wiremock`
//! inventory service and persists the cart with [`FileStorage`] in a
//! temporary directory.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cartkeeper-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::{Arc, Mutex, PoisonError};

use cartkeeper_cart::{
    CART_STORAGE_KEY, CartConfig, CartStorage, CartStore, FileStorage, HttpInventoryGateway,
    Notice, Notifier,
};
use cartkeeper_core::Cart;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Notifier that remembers every notice it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier(Arc<Mutex<Vec<Notice>>>);

impl RecordingNotifier {
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

/// Mock inventory service plus a private storage directory.
pub struct TestContext {
    pub server: MockServer,
    pub storage_dir: TempDir,
    pub notices: RecordingNotifier,
}

impl TestContext {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
            storage_dir: tempfile::tempdir().unwrap(),
            notices: RecordingNotifier::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> CartConfig {
        CartConfig {
            storage_dir: self.storage_dir.path().to_path_buf(),
            ..CartConfig::with_api_url(&self.server.uri()).unwrap()
        }
    }

    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.storage_dir.path())
    }

    /// Open a store the way the CLI does, sharing this context's notifier.
    #[must_use]
    pub fn open_store(&self) -> CartStore<HttpInventoryGateway> {
        let gateway = HttpInventoryGateway::new(&self.config()).unwrap();
        CartStore::open(gateway, self.storage(), self.notices.clone())
    }

    /// Cart currently on disk.
    #[must_use]
    pub fn persisted_cart(&self) -> Option<Cart> {
        self.storage()
            .read(CART_STORAGE_KEY)
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    /// Raw bytes currently on disk.
    #[must_use]
    pub fn persisted_raw(&self) -> Option<String> {
        self.storage().read(CART_STORAGE_KEY).unwrap()
    }

    /// Serve `GET /stock/{id}`.
    pub async fn mock_stock(&self, id: i32, amount: u32) {
        Mock::given(method("GET"))
            .and(path(format!("/stock/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "amount": amount,
            })))
            .mount(&self.server)
            .await;
    }

    /// Serve `GET /products/{id}`.
    pub async fn mock_product(&self, id: i32, title: &str, price: f64) {
        Mock::given(method("GET"))
            .and(path(format!("/products/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_json(id, title, price)))
            .mount(&self.server)
            .await;
    }

    /// Serve `GET /products`.
    pub async fn mock_catalog(&self, products: &[(i32, &str, f64)]) {
        let body: Vec<_> = products
            .iter()
            .map(|(id, title, price)| product_json(*id, title, *price))
            .collect();
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer every request with a server error.
    pub async fn fail_everything(&self) {
        self.server.reset().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&self.server)
            .await;
    }
}

fn product_json(id: i32, title: &str, price: f64) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "price": price,
        "image": format!("https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis{id}.jpg"),
    })
}
