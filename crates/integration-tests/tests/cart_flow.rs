//! End-to-end cart flows against a mock inventory service.
//!
//! Run with: cargo test -p cartkeeper-integration-tests

#![allow(clippy::unwrap_used)]

use cartkeeper_cart::{CartError, GatewayError, InventoryGateway, Notice};
use cartkeeper_core::{Price, ProductId};
use cartkeeper_integration_tests::TestContext;

// ============================================================================
// Adding
// ============================================================================

#[tokio::test]
async fn test_add_until_stock_is_exhausted() {
    let ctx = TestContext::new().await;
    ctx.mock_stock(1, 5).await;
    ctx.mock_product(1, "Tênis de Caminhada Leve Confortável", 179.9)
        .await;
    let store = ctx.open_store();
    let id = ProductId::new(1);

    store.add_product(id).await.unwrap();
    let cart = store.cart().await;
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.items()[0].amount, 1);
    assert_eq!(cart.items()[0].price, Price::from_cents(17990));

    for _ in 0..4 {
        store.add_product(id).await.unwrap();
    }
    assert_eq!(store.amount_in_cart(id).await, 5);

    let before = ctx.persisted_raw();
    let err = store.add_product(id).await.unwrap_err();

    assert!(err.is_stock_exceeded());
    assert_eq!(store.amount_in_cart(id).await, 5);
    assert_eq!(ctx.persisted_raw(), before);
    assert_eq!(ctx.notices.notices(), vec![Notice::StockExceeded(id)]);
}

#[tokio::test]
async fn test_add_with_service_down_changes_nothing() {
    let ctx = TestContext::new().await;
    ctx.fail_everything().await;
    let store = ctx.open_store();
    let id = ProductId::new(1);

    let err = store.add_product(id).await.unwrap_err();

    assert!(matches!(
        err,
        CartError::Gateway(GatewayError::Status { status: 500, .. })
    ));
    assert!(store.cart().await.is_empty());
    assert!(ctx.persisted_raw().is_none());
    assert_eq!(ctx.notices.notices(), vec![Notice::AddFailed(id)]);
}

#[tokio::test]
async fn test_add_with_missing_product_metadata_changes_nothing() {
    let ctx = TestContext::new().await;
    ctx.mock_stock(3, 2).await;
    let store = ctx.open_store();
    let id = ProductId::new(3);

    let err = store.add_product(id).await.unwrap_err();

    assert!(matches!(err, CartError::Gateway(GatewayError::NotFound(_))));
    assert!(store.cart().await.is_empty());
    assert_eq!(ctx.notices.notices(), vec![Notice::AddFailed(id)]);
}

// ============================================================================
// Removing and updating
// ============================================================================

#[tokio::test]
async fn test_remove_item() {
    let ctx = TestContext::new().await;
    ctx.mock_stock(1, 5).await;
    ctx.mock_product(1, "Tênis VR Caminhada Confortável Detalhes Couro Masculino", 139.9)
        .await;
    let store = ctx.open_store();
    let id = ProductId::new(1);

    for _ in 0..3 {
        store.add_product(id).await.unwrap();
    }
    store.remove_product(id).await.unwrap();

    assert!(store.cart().await.is_empty());
    assert!(ctx.persisted_cart().unwrap().is_empty());

    let err = store.remove_product(id).await.unwrap_err();
    assert!(matches!(err, CartError::ItemNotFound(_)));
    assert_eq!(ctx.notices.notices(), vec![Notice::RemoveFailed(id)]);
}

#[tokio::test]
async fn test_update_respects_stock() {
    let ctx = TestContext::new().await;
    ctx.mock_stock(2, 4).await;
    ctx.mock_product(2, "Tênis Adidas Duramo Lite 2.0", 219.9).await;
    let store = ctx.open_store();
    let id = ProductId::new(2);

    store.add_product(id).await.unwrap();
    store.add_product(id).await.unwrap();

    let err = store.update_product_amount(id, 10).await.unwrap_err();
    assert!(err.is_stock_exceeded());
    assert_eq!(store.amount_in_cart(id).await, 2);

    store.update_product_amount(id, 4).await.unwrap();
    assert_eq!(store.amount_in_cart(id).await, 4);
    assert_eq!(ctx.persisted_cart().unwrap().amount_of(id), 4);

    store.update_product_amount(id, 0).await.unwrap();
    assert_eq!(store.amount_in_cart(id).await, 4);

    assert_eq!(ctx.notices.notices(), vec![Notice::StockExceeded(id)]);
}

// ============================================================================
// Persistence
// ============================================================================

#[tokio::test]
async fn test_cart_survives_restart() {
    let ctx = TestContext::new().await;
    ctx.mock_stock(1, 5).await;
    ctx.mock_stock(2, 5).await;
    ctx.mock_product(1, "Tênis de Caminhada Leve Confortável", 179.9)
        .await;
    ctx.mock_product(2, "Tênis VR Caminhada Confortável Detalhes Couro Masculino", 139.9)
        .await;

    let first = ctx.open_store();
    first.add_product(ProductId::new(2)).await.unwrap();
    first.add_product(ProductId::new(1)).await.unwrap();
    first.add_product(ProductId::new(2)).await.unwrap();
    let expected = first.cart().await;
    drop(first);

    let reopened = ctx.open_store();
    let cart = reopened.cart().await;

    assert_eq!(cart, expected);
    assert_eq!(ctx.persisted_cart().unwrap(), expected);
    let ids: Vec<i32> = cart.items().iter().map(|i| i.id.as_i32()).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn test_corrupt_storage_starts_empty() {
    let ctx = TestContext::new().await;
    std::fs::write(
        ctx.storage()
            .path_for(cartkeeper_cart::CART_STORAGE_KEY),
        "[{\"id\": ",
    )
    .unwrap();

    let store = ctx.open_store();

    assert!(store.cart().await.is_empty());
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn test_catalog_badges() {
    let ctx = TestContext::new().await;
    ctx.mock_catalog(&[
        (1, "Tênis de Caminhada Leve Confortável", 179.9),
        (2, "Tênis VR Caminhada Confortável Detalhes Couro Masculino", 139.9),
    ])
    .await;
    ctx.mock_stock(2, 3).await;
    let store = ctx.open_store();

    let products = store.gateway().list_products().await.unwrap();
    // Metadata for product 2 comes from the warmed catalog cache
    store.add_product(ProductId::new(2)).await.unwrap();
    let snapshot = store.snapshot().await;

    let badges: Vec<u32> = products.iter().map(|p| snapshot.amount_of(p.id)).collect();
    assert_eq!(badges, vec![0, 1]);
}
