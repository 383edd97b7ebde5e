use axum::{routing::get, Router};

pub mod products;
pub mod sellers;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/sellers", sellers::router())
        .nest("/products", products::router())
}
