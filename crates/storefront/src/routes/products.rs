//! Product route handlers.
//!
//! The product page is served in two steps: a shell that renders immediately
//! with a loading placeholder, and an HTMX fragment that replaces it with
//! either the detail view or "not found". Thumbnail selection and quantity
//! adjustment re-request the fragment with `?image=` / `?quantity=`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use clementine_core::{CurrencyCode, Price, ProductId, Quantity};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::state::AppState;
use crate::store::Product;

/// Fallback copy for products without a description.
const NO_DESCRIPTION: &str = "No description available.";

/// Product display data for the detail fragment.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub description: String,
    pub main_image: String,
    pub images: Vec<ThumbnailView>,
    pub quantity: u32,
}

/// Thumbnail display data.
#[derive(Clone)]
pub struct ThumbnailView {
    pub url: String,
    pub selected: bool,
}

/// Query parameters carried by the detail fragment links.
#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    /// Selected main image; defaults to the product's first image.
    pub image: Option<String>,
    /// Selected quantity; floor-clamped at 1.
    pub quantity: Option<u32>,
}

impl ProductDetailView {
    fn new(product: &Product, query: &DetailQuery) -> Self {
        // The clicked thumbnail URL is trusted as-is
        let main_image = query
            .image
            .clone()
            .unwrap_or_else(|| product.first_image().to_string());
        let quantity = Quantity::new(query.quantity.unwrap_or(1));

        let images = product
            .image_urls
            .clone()
            .unwrap_or_default()
            .into_iter()
            .map(|url| ThumbnailView {
                selected: url == main_image,
                url,
            })
            .collect();

        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: Price::new(product.price, CurrencyCode::USD).display(),
            description: product
                .description
                .clone()
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            main_image,
            images,
            quantity: quantity.get(),
        }
    }
}

/// Product page shell template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub id: String,
}

/// Product detail fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_detail.html")]
pub struct ProductDetailTemplate {
    pub product: ProductDetailView,
    pub cart_url: String,
}

/// Not-found fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_not_found.html")]
pub struct ProductNotFoundTemplate;

/// Display the product page shell.
///
/// Renders immediately with the loading placeholder; the detail fragment
/// loads in its place.
pub async fn show(Path(id): Path<String>) -> ProductShowTemplate {
    ProductShowTemplate { id }
}

/// Render the product detail fragment.
///
/// A failed lookup and a missing row both land on the not-found fragment;
/// the loading placeholder never survives this response, success or failure.
#[instrument(skip(state, query), fields(id = %id))]
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DetailQuery>,
) -> Response {
    let product_id = ProductId::from(id.as_str());

    match state.store().fetch_product(&product_id).await {
        Ok(product) => ProductDetailTemplate {
            product: ProductDetailView::new(&product, &query),
            cart_url: state.config().cart_url.clone(),
        }
        .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch product {id}: {e}");
            ProductNotFoundTemplate.into_response()
        }
    }
}
