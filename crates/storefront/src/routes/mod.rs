//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (product grid)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products/{id}          - Product page shell (loading placeholder)
//! GET  /products/{id}/detail   - Product detail fragment (HTMX)
//!
//! # Cart
//! POST /cart/add               - Add one line to the cart (returns notice fragment)
//! ```

pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(products::show))
        .route("/{id}/detail", get(products::detail))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new().route("/add", post(cart::add))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
}
