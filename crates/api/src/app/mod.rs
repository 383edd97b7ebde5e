//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: storage + service wiring (in-memory by default, Postgres
//!   behind the `postgres` feature)
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app() -> Router {
    let services = Arc::new(services::build_services().await);
    build_app_with(services)
}

/// Build the router around pre-built services (used by tests).
pub fn build_app_with(services: Arc<services::AppServices>) -> Router {
    routes::router()
        .layer(Extension(services))
        .fallback(routes::system::unknown_path)
}
