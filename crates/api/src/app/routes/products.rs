use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use bazaar_core::ProductId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/:id/seller", get(get_product_seller))
}

/// Reverse lookup: product identifier → owning seller.
pub async fn get_product_seller(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let product_id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid product id"),
    };

    match services.lookup.owning_seller(product_id).await {
        Ok(seller) => (StatusCode::OK, Json(serde_json::json!(seller))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

// Seller-scoped product handlers, mounted under `/sellers/:name/products`.

pub async fn add_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(seller): Path<String>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    match services.ledger.add_product(&seller, &body.name).await {
        Ok(product) => (StatusCode::CREATED, Json(serde_json::json!(product))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn rename_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path((seller, product)): Path<(String, String)>,
    Json(body): Json<dto::RenameProductRequest>,
) -> axum::response::Response {
    match services
        .ledger
        .rename_product(&seller, &product, &body.new_name)
        .await
    {
        Ok(product) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "product was successfully updated",
                "product": product,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path((seller, product)): Path<(String, String)>,
) -> axum::response::Response {
    match services.ledger.delete_product(&seller, &product).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({"message": "product was successfully deleted"})),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
