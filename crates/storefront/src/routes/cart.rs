//! Cart route handlers.
//!
//! Add-to-cart is an HTMX form post. The outcome renders as a notice
//! fragment swapped into the page; the submit control is disabled while the
//! request is in flight, preventing duplicate submissions from the button.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use clementine_core::{ProductId, Quantity};
use serde::Deserialize;
use tracing::instrument;

use crate::state::AppState;
use crate::store::CartLine;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    /// The selected main image; defaults to the product's first image.
    pub image: Option<String>,
    /// Floor-clamped at 1.
    pub quantity: Option<u32>,
}

/// Cart notice fragment template (success or failure).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_notice.html")]
pub struct CartNoticeTemplate {
    pub success: bool,
    pub message: String,
}

impl CartNoticeTemplate {
    fn added() -> Self {
        Self {
            success: true,
            message: "Added to cart!".to_string(),
        }
    }

    fn failed() -> Self {
        Self {
            success: false,
            message: "Failed to add to cart!".to_string(),
        }
    }
}

/// Add one line to the cart.
///
/// The product record is re-read as the authoritative source of name and
/// price. When it cannot be loaded there is nothing to submit: no insert is
/// attempted and the failure notice renders.
#[instrument(skip(state, form), fields(product_id = %form.product_id))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddToCartForm>) -> Response {
    let product_id = ProductId::from(form.product_id.as_str());

    let product = match state.store().fetch_product(&product_id).await {
        Ok(product) => product,
        Err(e) => {
            tracing::error!("Failed to load product for cart add: {e}");
            return CartNoticeTemplate::failed().into_response();
        }
    };

    let image_url = form
        .image
        .unwrap_or_else(|| product.first_image().to_string());
    let line = CartLine {
        product_id: product.id.clone(),
        name: product.name.clone(),
        price: product.price,
        image_url,
        quantity: Quantity::new(form.quantity.unwrap_or(1)),
    };

    match state.store().insert_cart_line(line).await {
        Ok(()) => CartNoticeTemplate::added().into_response(),
        Err(e) => {
            tracing::error!("Failed to add item to cart: {e}");
            CartNoticeTemplate::failed().into_response()
        }
    }
}
