//! Abstract persistence port for sellers and products.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use bazaar_core::{DomainError, ProductId, SellerId};

use crate::product::Product;
use crate::seller::Seller;

/// Storage operation error.
///
/// Infrastructure failures only; the services translate these into domain
/// errors (`UniqueViolation` → `Conflict`, `Backend` → `Internal`).
#[derive(Debug, Error)]
pub enum StoreError {
    /// A storage-level uniqueness constraint rejected the write.
    ///
    /// The constraint is the authoritative enforcement of name uniqueness;
    /// the service-level existence checks are a fast path that produces a
    /// friendlier message (a concurrent writer can still lose the race and
    /// land here).
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Any other backend failure (connection, lock, serialization).
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(msg) => DomainError::conflict(msg),
            StoreError::Backend(msg) => DomainError::internal(msg),
        }
    }
}

/// Abstract store for sellers and products, backed by a relational table pair:
/// `sellers(id, name unique)` and `products(id, name, seller_id)` with a
/// uniqueness constraint on `(seller_id, name)`.
///
/// Every mutating operation is individually atomic: the backend performs the
/// write (including the seller-delete cascade) within one transaction, with
/// its uniqueness constraints as the final arbiter.
#[async_trait]
pub trait MarketStore: Send + Sync {
    /// All sellers, in storage's natural order.
    async fn list_sellers(&self) -> Result<Vec<Seller>, StoreError>;

    async fn find_seller_by_name(&self, name: &str) -> Result<Option<Seller>, StoreError>;

    async fn find_seller_by_id(&self, id: SellerId) -> Result<Option<Seller>, StoreError>;

    async fn seller_name_taken(&self, name: &str) -> Result<bool, StoreError>;

    /// Insert a new seller; the store assigns the identifier.
    async fn insert_seller(&self, name: &str) -> Result<Seller, StoreError>;

    async fn rename_seller(&self, id: SellerId, new_name: &str) -> Result<(), StoreError>;

    /// Delete a seller and cascade-delete all of its products atomically.
    async fn delete_seller(&self, id: SellerId) -> Result<(), StoreError>;

    /// All products owned by a seller, in storage's natural order.
    async fn products_of(&self, seller_id: SellerId) -> Result<Vec<Product>, StoreError>;

    async fn find_product_by_name(
        &self,
        seller_id: SellerId,
        name: &str,
    ) -> Result<Option<Product>, StoreError>;

    async fn find_product_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Insert a new product attached to a seller; the store assigns the identifier.
    async fn insert_product(
        &self,
        seller_id: SellerId,
        name: &str,
    ) -> Result<Product, StoreError>;

    async fn rename_product(&self, id: ProductId, new_name: &str) -> Result<(), StoreError>;

    async fn delete_product(&self, id: ProductId) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> MarketStore for Arc<S>
where
    S: MarketStore + ?Sized,
{
    async fn list_sellers(&self) -> Result<Vec<Seller>, StoreError> {
        (**self).list_sellers().await
    }

    async fn find_seller_by_name(&self, name: &str) -> Result<Option<Seller>, StoreError> {
        (**self).find_seller_by_name(name).await
    }

    async fn find_seller_by_id(&self, id: SellerId) -> Result<Option<Seller>, StoreError> {
        (**self).find_seller_by_id(id).await
    }

    async fn seller_name_taken(&self, name: &str) -> Result<bool, StoreError> {
        (**self).seller_name_taken(name).await
    }

    async fn insert_seller(&self, name: &str) -> Result<Seller, StoreError> {
        (**self).insert_seller(name).await
    }

    async fn rename_seller(&self, id: SellerId, new_name: &str) -> Result<(), StoreError> {
        (**self).rename_seller(id, new_name).await
    }

    async fn delete_seller(&self, id: SellerId) -> Result<(), StoreError> {
        (**self).delete_seller(id).await
    }

    async fn products_of(&self, seller_id: SellerId) -> Result<Vec<Product>, StoreError> {
        (**self).products_of(seller_id).await
    }

    async fn find_product_by_name(
        &self,
        seller_id: SellerId,
        name: &str,
    ) -> Result<Option<Product>, StoreError> {
        (**self).find_product_by_name(seller_id, name).await
    }

    async fn find_product_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).find_product_by_id(id).await
    }

    async fn insert_product(
        &self,
        seller_id: SellerId,
        name: &str,
    ) -> Result<Product, StoreError> {
        (**self).insert_product(seller_id, name).await
    }

    async fn rename_product(&self, id: ProductId, new_name: &str) -> Result<(), StoreError> {
        (**self).rename_product(id, new_name).await
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), StoreError> {
        (**self).delete_product(id).await
    }
}
