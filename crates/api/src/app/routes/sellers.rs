use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};

use crate::app::routes::products;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_seller).get(list_sellers))
        .route("/:name", patch(rename_seller).delete(delete_seller))
        .route(
            "/:name/products",
            get(list_seller_products).post(products::add_product),
        )
        .route(
            "/:name/products/:product",
            patch(products::rename_product).delete(products::delete_product),
        )
}

pub async fn list_sellers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.directory.list_sellers().await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_seller(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateSellerRequest>,
) -> axum::response::Response {
    match services.directory.create_seller(&body.name).await {
        Ok(seller) => (StatusCode::CREATED, Json(serde_json::json!(seller))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn rename_seller(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
    Json(body): Json<dto::RenameSellerRequest>,
) -> axum::response::Response {
    match services.directory.rename_seller(&name, &body.new_name).await {
        Ok(seller) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "seller was successfully updated",
                "seller": seller,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_seller(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    match services.directory.delete_seller(&name).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({"message": "seller was successfully deleted"})),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_seller_products(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    match services.directory.products_of(&name).await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
