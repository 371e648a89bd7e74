//! Domain types for the hosted store.
//!
//! These types mirror the `products` and `cart` rows as PostgREST serves
//! them, decoupled from any HTTP concerns.

use clementine_core::{ProductId, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product row from the `products` collection.
///
/// Immutable once fetched; the requesting handler owns it for the duration
/// of the response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price. PostgREST serializes `numeric` columns as JSON numbers.
    pub price: Decimal,
    /// Optional marketing copy.
    #[serde(default)]
    pub description: Option<String>,
    /// Ordered gallery image URLs; may be absent entirely.
    #[serde(default)]
    pub image_urls: Option<Vec<String>>,
}

impl Product {
    /// The default main image: the first gallery URL, or empty if none.
    #[must_use]
    pub fn first_image(&self) -> &str {
        self.image_urls
            .as_deref()
            .and_then(|urls| urls.first())
            .map_or("", String::as_str)
    }
}

/// One purchase-intent row for the `cart` collection.
///
/// Built transiently at add-to-cart time and handed to the store; nothing
/// is read back (no generated identifier is consumed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product this line refers to.
    pub product_id: ProductId,
    /// Product name at submission time.
    pub name: String,
    /// Unit price at submission time.
    pub price: Decimal,
    /// The main image the buyer had selected.
    pub image_url: String,
    /// Chosen quantity, always >= 1.
    pub quantity: Quantity,
}
