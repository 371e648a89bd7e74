//! Router tests for add-to-cart submission.

mod common;

use axum::http::StatusCode;
use clementine_core::ProductId;
use common::{MemoryStore, app, get, post_form, widget};
use rust_decimal::Decimal;

#[tokio::test]
async fn add_submits_exactly_one_line() {
    let store = MemoryStore::with_products(vec![widget()]);
    let (status, body) = post_form(
        app(store.clone()),
        "/cart/add",
        "product_id=p1&image=b.png&quantity=3",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Added to cart!"));

    let inserted = store.inserted.lock().expect("lock poisoned");
    assert_eq!(inserted.len(), 1);
    let line = inserted.first().expect("one line");
    assert_eq!(line.product_id, ProductId::new("p1"));
    assert_eq!(line.name, "Widget");
    assert_eq!(line.price, Decimal::new(999, 2));
    assert_eq!(line.image_url, "b.png");
    assert_eq!(line.quantity.get(), 3);
}

#[tokio::test]
async fn add_defaults_image_and_quantity() {
    let store = MemoryStore::with_products(vec![widget()]);
    let (_, body) = post_form(app(store.clone()), "/cart/add", "product_id=p1").await;

    assert!(body.contains("Added to cart!"));

    let inserted = store.inserted.lock().expect("lock poisoned");
    let line = inserted.first().expect("one line");
    assert_eq!(line.image_url, "a.png");
    assert_eq!(line.quantity.get(), 1);
}

#[tokio::test]
async fn add_clamps_zero_quantity() {
    let store = MemoryStore::with_products(vec![widget()]);
    let (_, _) = post_form(
        app(store.clone()),
        "/cart/add",
        "product_id=p1&quantity=0",
    )
    .await;

    let inserted = store.inserted.lock().expect("lock poisoned");
    assert_eq!(inserted.first().expect("one line").quantity.get(), 1);
}

#[tokio::test]
async fn add_without_loadable_product_attempts_no_insert() {
    // Unknown product id
    let store = MemoryStore::with_products(Vec::new());
    let (status, body) = post_form(app(store.clone()), "/cart/add", "product_id=p1").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Failed to add to cart!"));
    assert!(store.inserted.lock().expect("lock poisoned").is_empty());

    // Store error on the lookup
    let store = MemoryStore::failing_fetch();
    let (_, body) = post_form(app(store.clone()), "/cart/add", "product_id=p1").await;

    assert!(body.contains("Failed to add to cart!"));
    assert!(store.inserted.lock().expect("lock poisoned").is_empty());
}

#[tokio::test]
async fn add_insert_failure_renders_failure_notice() {
    let store = MemoryStore::failing_insert(vec![widget()]);
    let (status, body) = post_form(
        app(store.clone()),
        "/cart/add",
        "product_id=p1&image=a.png&quantity=2",
    )
    .await;

    // The interaction recovers locally: notice renders, nothing rolled back
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Failed to add to cart!"));
}

/// The canonical walkthrough: load, pick the second image, increment twice,
/// add to cart.
#[tokio::test]
async fn add_after_gallery_walkthrough() {
    let store = MemoryStore::with_products(vec![widget()]);

    // Load: main image defaults to the first gallery URL
    let (_, body) = get(app(store.clone()), "/products/p1/detail").await;
    assert!(body.contains(r#"class="main-image" src="a.png""#));

    // Thumbnail click, then two increments
    let (_, body) = get(
        app(store.clone()),
        "/products/p1/detail?image=b.png&quantity=3",
    )
    .await;
    assert!(body.contains(r#"class="main-image" src="b.png""#));
    assert!(body.contains(r#"<span class="quantity">3</span>"#));

    // Submit what the fragment's form carries
    let (_, body) = post_form(
        app(store.clone()),
        "/cart/add",
        "product_id=p1&image=b.png&quantity=3",
    )
    .await;
    assert!(body.contains("Added to cart!"));

    let inserted = store.inserted.lock().expect("lock poisoned");
    let line = inserted.first().expect("one line");
    assert_eq!(line.product_id, ProductId::new("p1"));
    assert_eq!(line.name, "Widget");
    assert_eq!(line.price, Decimal::new(999, 2));
    assert_eq!(line.image_url, "b.png");
    assert_eq!(line.quantity.get(), 3);
}
