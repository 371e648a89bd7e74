//! Shared helpers for storefront router tests.
//!
//! Handlers are driven in-process through `tower::ServiceExt::oneshot`
//! against [`MemoryStore`], an in-memory [`ProductStore`] double that
//! records inserted cart lines.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use clementine_core::ProductId;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use secrecy::SecretString;
use tower::ServiceExt;
use url::Url;

use clementine_storefront::config::{StorefrontConfig, SupabaseConfig};
use clementine_storefront::routes;
use clementine_storefront::state::AppState;
use clementine_storefront::store::{CartLine, Product, ProductStore, StoreError};

/// In-memory store double.
pub struct MemoryStore {
    products: Vec<Product>,
    /// Cart lines received by `insert_cart_line`.
    pub inserted: Mutex<Vec<CartLine>>,
    fail_fetch: bool,
    fail_insert: bool,
}

impl MemoryStore {
    /// A store serving the given products.
    pub fn with_products(products: Vec<Product>) -> Arc<Self> {
        Arc::new(Self {
            products,
            inserted: Mutex::new(Vec::new()),
            fail_fetch: false,
            fail_insert: false,
        })
    }

    /// A store whose reads all fail with a transport-level error.
    pub fn failing_fetch() -> Arc<Self> {
        Arc::new(Self {
            products: Vec::new(),
            inserted: Mutex::new(Vec::new()),
            fail_fetch: true,
            fail_insert: false,
        })
    }

    /// A store that serves products but rejects cart inserts.
    pub fn failing_insert(products: Vec<Product>) -> Arc<Self> {
        Arc::new(Self {
            products,
            inserted: Mutex::new(Vec::new()),
            fail_fetch: false,
            fail_insert: true,
        })
    }

    fn unavailable() -> StoreError {
        StoreError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        }
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn fetch_product(&self, id: &ProductId) -> Result<Product, StoreError> {
        if self.fail_fetch {
            return Err(Self::unavailable());
        }
        self.products
            .iter()
            .find(|product| &product.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Product not found: {id}")))
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        if self.fail_fetch {
            return Err(Self::unavailable());
        }
        Ok(self.products.clone())
    }

    async fn insert_cart_line(&self, line: CartLine) -> Result<(), StoreError> {
        if self.fail_insert {
            return Err(Self::unavailable());
        }
        self.inserted.lock().expect("lock poisoned").push(line);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.fail_fetch {
            return Err(Self::unavailable());
        }
        Ok(())
    }
}

/// The product from the canonical walkthrough: two gallery images, $9.99.
pub fn widget() -> Product {
    Product {
        id: ProductId::new("p1"),
        name: "Widget".to_string(),
        price: Decimal::new(999, 2),
        description: None,
        image_urls: Some(vec!["a.png".to_string(), "b.png".to_string()]),
    }
}

/// Build the storefront router around a store double.
pub fn app(store: Arc<MemoryStore>) -> Router {
    let config = StorefrontConfig {
        host: "127.0.0.1".parse().expect("valid address"),
        port: 3000,
        cart_url: "/cart".to_string(),
        supabase: SupabaseConfig {
            project_url: Url::parse("http://localhost:54321").expect("valid url"),
            service_key: SecretString::from("unused-in-tests"),
        },
        sentry_dsn: None,
    };

    routes::routes().with_state(AppState::new(config, store))
}

/// Issue a GET request and collect the response.
pub async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    send(app, request).await
}

/// Issue a form POST and collect the response.
pub async fn post_form(app: Router, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(Body::from(body.to_string()))
        .expect("valid request");
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.expect("request handled");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collected")
        .to_bytes();
    (status, String::from_utf8(bytes.to_vec()).expect("utf-8 body"))
}
