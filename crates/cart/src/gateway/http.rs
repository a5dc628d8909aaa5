//! HTTP inventory service client.
//!
//! Talks to a JSON REST service exposing:
//! - `GET /stock/{id}` -> `{ "id": 1, "amount": 3 }`
//! - `GET /products/{id}` -> `{ "id": 1, "title": "...", "price": 179.9, "image": "..." }`
//! - `GET /products` -> array of products
//!
//! Product metadata is cached using `moka`; stock is fetched on every call.

use std::sync::Arc;

use cartkeeper_core::{Product, ProductId, StockRecord};
use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::InventoryGateway;
use super::cache::{CacheKey, CacheValue};
use crate::config::CartConfig;
use crate::error::GatewayError;

/// Maximum characters of an error body kept for diagnostics.
const ERROR_BODY_PREVIEW: usize = 200;

/// Client for the inventory/catalog REST service.
///
/// Cheap to clone; clones share the HTTP connection pool and product cache.
#[derive(Clone)]
pub struct HttpInventoryGateway {
    inner: Arc<HttpInventoryGatewayInner>,
}

struct HttpInventoryGatewayInner {
    client: reqwest::Client,
    base_url: Url,
    api_token: Option<SecretString>,
    cache: Cache<CacheKey, CacheValue>,
}

impl HttpInventoryGateway {
    /// Create a new inventory client.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Http` if the HTTP client cannot be built.
    pub fn new(config: &CartConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.product_cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(HttpInventoryGatewayInner {
                client,
                base_url: config.api_url.clone(),
                api_token: config.api_token.clone(),
                cache,
            }),
        })
    }

    /// GET a path relative to the base URL and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let url = self.inner.base_url.join(path)?;

        let mut request = self.inner.client.get(url.clone());
        if let Some(token) = &self.inner.api_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(path.to_string()));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                url = %url,
                body = %body.chars().take(ERROR_BODY_PREVIEW).collect::<String>(),
                "Inventory service returned non-success status"
            );
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_PREVIEW).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                url = %url,
                body = %body.chars().take(ERROR_BODY_PREVIEW).collect::<String>(),
                "Failed to parse inventory service response"
            );
            GatewayError::Parse(e)
        })
    }
}

impl InventoryGateway for HttpInventoryGateway {
    #[instrument(skip(self, id), fields(product_id = %id))]
    async fn get_stock(&self, id: ProductId) -> Result<StockRecord, GatewayError> {
        let stock: StockRecord = self.get_json(&format!("stock/{id}")).await?;
        debug!(available = stock.amount, "Fetched stock level");
        Ok(stock)
    }

    #[instrument(skip(self, id), fields(product_id = %id))]
    async fn get_product(&self, id: ProductId) -> Result<Product, GatewayError> {
        let key = CacheKey::Product(id);

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self.get_json(&format!("products/{id}")).await?;

        self.inner
            .cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, GatewayError> {
        if let Some(CacheValue::Catalog(products)) = self.inner.cache.get(&CacheKey::Catalog).await
        {
            debug!("Cache hit for catalog");
            return Ok(products);
        }

        let products: Vec<Product> = self.get_json("products").await?;
        debug!(count = products.len(), "Fetched catalog");

        for product in &products {
            self.inner
                .cache
                .insert(
                    CacheKey::Product(product.id),
                    CacheValue::Product(Box::new(product.clone())),
                )
                .await;
        }
        self.inner
            .cache
            .insert(CacheKey::Catalog, CacheValue::Catalog(products.clone()))
            .await;

        Ok(products)
    }
}
