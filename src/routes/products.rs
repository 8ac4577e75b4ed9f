use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::{
    AppState,
    error::Result,
    models::{AddProductRequest, ProductListResponse},
    queries::product_queries,
};

/// Lists every product in the catalog. A backend read failure is absorbed
/// here: the response carries an empty list plus a notice, and the service
/// keeps running.
pub async fn list_products(State(state): State<AppState>) -> Json<ProductListResponse> {
    match product_queries::list_products(state.store.as_ref()).await {
        Ok(products) => {
            let notice = products
                .is_empty()
                .then(|| "No products available.".to_string());

            Json(ProductListResponse { products, notice })
        }
        Err(err) => {
            tracing::error!("Failed to retrieve products: {}", err);

            Json(ProductListResponse {
                products: Vec::new(),
                notice: Some("Error retrieving products. Please try again later.".to_string()),
            })
        }
    }
}

/// Validates the form input and upserts the product. Validation failures
/// never reach the store.
pub async fn add_product(
    State(state): State<AppState>,
    Json(payload): Json<AddProductRequest>,
) -> Result<impl IntoResponse> {
    let product = payload.validate()?;

    product_queries::add_product(state.store.as_ref(), &product).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Product added successfully!" })),
    ))
}
