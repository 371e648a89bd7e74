//! Supabase PostgREST client implementation.
//!
//! Speaks the auto-generated REST interface of the hosted project:
//! single-object reads use `Accept: application/vnd.pgrst.object+json`
//! (PostgREST answers 406 when no row matches), inserts send
//! `Prefer: return=minimal`. Product reads are cached using `moka`
//! (5-minute TTL).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use clementine_core::ProductId;
use moka::future::Cache;
use reqwest::Method;
use reqwest::header::{ACCEPT, HeaderMap};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::SupabaseConfig;

use super::types::{CartLine, Product};
use super::{ProductStore, StoreError};

/// Name of the product collection.
const PRODUCTS_TABLE: &str = "products";
/// Name of the cart collection.
const CART_TABLE: &str = "cart";

/// Client for the Supabase PostgREST interface.
///
/// Provides the point lookup and one-row insert the storefront needs.
/// Product reads are cached for 5 minutes.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<SupabaseClientInner>,
}

struct SupabaseClientInner {
    client: reqwest::Client,
    rest_url: String,
    service_key: String,
    cache: Cache<ProductId, Product>,
}

impl SupabaseClient {
    /// Create a new PostgREST client.
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(SupabaseClientInner {
                client: reqwest::Client::new(),
                rest_url: config.rest_endpoint(),
                service_key: config.service_key.expose_secret().to_string(),
                cache,
            }),
        }
    }

    /// Start a request against a collection, with auth headers attached.
    fn request(&self, method: Method, table: &str) -> reqwest::RequestBuilder {
        self.inner
            .client
            .request(method, format!("{}/{table}", self.inner.rest_url))
            // PostgREST expects the key both as `apikey` and as a bearer token
            // See: https://supabase.com/docs/guides/api/api-keys
            .header("apikey", &self.inner.service_key)
            .bearer_auth(&self.inner.service_key)
    }
}

#[async_trait]
impl ProductStore for SupabaseClient {
    #[instrument(skip(self), fields(id = %id))]
    async fn fetch_product(&self, id: &ProductId) -> Result<Product, StoreError> {
        // Check cache
        if let Some(product) = self.inner.cache.get(id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let id_filter = format!("eq.{id}");
        let response = self
            .request(Method::GET, PRODUCTS_TABLE)
            .query(&[("select", "*"), ("id", id_filter.as_str())])
            .header(ACCEPT, "application/vnd.pgrst.object+json")
            .send()
            .await?;

        // Single-object mode answers 406 when no row matches the filter
        if response.status() == reqwest::StatusCode::NOT_ACCEPTABLE {
            return Err(StoreError::NotFound(format!("Product not found: {id}")));
        }

        let response = check_status(response).await?;
        let product: Product = decode(response).await?;

        // Cache the result
        self.inner.cache.insert(id.clone(), product.clone()).await;

        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let response = self
            .request(Method::GET, PRODUCTS_TABLE)
            .query(&[("select", "*"), ("order", "name.asc")])
            .send()
            .await?;

        let response = check_status(response).await?;
        decode(response).await
    }

    #[instrument(skip(self, line), fields(product_id = %line.product_id))]
    async fn insert_cart_line(&self, line: CartLine) -> Result<(), StoreError> {
        let response = self
            .request(Method::POST, CART_TABLE)
            .header("Prefer", "return=minimal")
            .json(&[line])
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> Result<(), StoreError> {
        let response = self
            .request(Method::GET, PRODUCTS_TABLE)
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}

/// Triage a response status before reading the body.
///
/// # Errors
///
/// Returns `RateLimited` on 429 and `Api` on any other non-success status,
/// with a body excerpt for diagnostics.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(StoreError::RateLimited(retry_after_seconds(
            response.headers(),
        )));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!(
            status = %status,
            body = %excerpt(&body, 500),
            "Supabase API returned non-success status"
        );
        return Err(StoreError::Api {
            status: status.as_u16(),
            message: excerpt(&body, 200),
        });
    }

    Ok(response)
}

/// Decode a response body, logging an excerpt on parse failure.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StoreError> {
    // Read the body as text first for better error diagnostics
    let response_text = response.text().await?;

    match serde_json::from_str(&response_text) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::error!(
                error = %e,
                body = %excerpt(&response_text, 500),
                "Failed to parse Supabase response"
            );
            Err(StoreError::Parse(e))
        }
    }
}

/// Parse the `Retry-After` header, defaulting to 1 second.
fn retry_after_seconds(headers: &HeaderMap) -> u64 {
    headers
        .get("Retry-After")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(1)
}

/// First `limit` characters of a body, for log lines.
fn excerpt(body: &str, limit: usize) -> String {
    body.chars().take(limit).collect()
}
