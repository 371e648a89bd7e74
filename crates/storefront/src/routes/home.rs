//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use clementine_core::{CurrencyCode, Price};
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::state::AppState;
use crate::store::Product;

/// Product display data for the grid.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub price: String,
    /// First gallery image URL; empty when the product has none.
    pub image: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: Price::new(product.price, CurrencyCode::USD).display(),
            image: product.first_image().to_string(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductCardView>,
}

/// Display the home page product grid.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<HomeTemplate, AppError> {
    let products = state.store().list_products().await?;

    Ok(HomeTemplate {
        products: products.iter().map(ProductCardView::from).collect(),
    })
}
