use std::sync::Arc;

use bazaar_infra::InMemoryStore;
use bazaar_market::{MarketStore, ProductLedger, SellerDirectory, SellerLookup};

/// The three core services, sharing one store.
pub struct AppServices {
    pub directory: SellerDirectory,
    pub ledger: ProductLedger,
    pub lookup: SellerLookup,
}

impl AppServices {
    pub fn from_store(store: Arc<dyn MarketStore>) -> Self {
        Self {
            directory: SellerDirectory::new(store.clone()),
            ledger: ProductLedger::new(store.clone()),
            lookup: SellerLookup::new(store),
        }
    }
}

/// Wire up services against the configured storage backend.
///
/// With the `postgres` feature enabled and `DATABASE_URL` set, uses the
/// relational store (applying the schema on startup); otherwise the in-memory
/// store.
pub async fn build_services() -> AppServices {
    #[cfg(feature = "postgres")]
    if let Ok(url) = std::env::var("DATABASE_URL") {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect(&url)
            .await
            .expect("failed to connect to DATABASE_URL");
        let store = bazaar_infra::PostgresStore::new(pool);
        store.migrate().await.expect("failed to apply schema");
        tracing::info!("using postgres storage");
        return AppServices::from_store(Arc::new(store));
    }

    tracing::info!("using in-memory storage");
    AppServices::from_store(Arc::new(InMemoryStore::new()))
}
