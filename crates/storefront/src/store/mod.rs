//! Data access for the hosted Supabase store.
//!
//! # Architecture
//!
//! - Handlers depend on the [`ProductStore`] trait, not on a concrete
//!   backend, so the page logic is testable without a live network.
//! - [`SupabaseClient`] is the production implementation, speaking PostgREST
//!   over `reqwest`.
//! - Product reads are cached in-memory via `moka` (5 minute TTL); cart
//!   writes are never cached.
//!
//! # Example
//!
//! ```rust,ignore
//! use clementine_storefront::store::{ProductStore, SupabaseClient};
//!
//! let client = SupabaseClient::new(&config.supabase);
//!
//! let product = client.fetch_product(&"p1".into()).await?;
//! client
//!     .insert_cart_line(CartLine {
//!         product_id: product.id.clone(),
//!         name: product.name.clone(),
//!         price: product.price,
//!         image_url: product.first_image().to_string(),
//!         quantity: Quantity::MIN,
//!     })
//!     .await?;
//! ```

mod supabase;
pub mod types;

pub use supabase::SupabaseClient;
pub use types::{CartLine, Product};

use async_trait::async_trait;
use clementine_core::ProductId;
use thiserror::Error;

/// Errors that can occur when talking to the hosted store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// No row matched the lookup.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the store.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The store answered with a non-success status.
    #[error("Store API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body excerpt.
        message: String,
    },
}

/// Read/write access to the external product and cart collections.
///
/// The storefront's only persistence surface: a point lookup on `products`
/// and a one-row insert into `cart`. Injected into [`crate::state::AppState`]
/// so tests can substitute an in-memory double.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Look up a single product row by identifier.
    ///
    /// A missing row is [`StoreError::NotFound`].
    async fn fetch_product(&self, id: &ProductId) -> Result<Product, StoreError>;

    /// List products for the storefront grid, ordered by name.
    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Insert one cart line. No generated identifier is consumed.
    async fn insert_cart_line(&self, line: CartLine) -> Result<(), StoreError>;

    /// Cheap readiness probe against the store.
    async fn ping(&self) -> Result<(), StoreError>;
}
