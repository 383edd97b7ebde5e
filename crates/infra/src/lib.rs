//! Infrastructure layer: storage adapters for the marketplace domain.

pub mod store;

#[cfg(test)]
mod integration_tests;

pub use store::InMemoryStore;
#[cfg(feature = "postgres")]
pub use store::PostgresStore;
