//! Reverse lookup: product identifier → owning seller.

use std::sync::Arc;

use bazaar_core::{DomainError, DomainResult, ProductId};

use crate::seller::Seller;
use crate::store::MarketStore;

#[derive(Clone)]
pub struct SellerLookup {
    store: Arc<dyn MarketStore>,
}

impl SellerLookup {
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self { store }
    }

    /// The seller owning the product with the given identifier.
    pub async fn owning_seller(&self, product_id: ProductId) -> DomainResult<Seller> {
        let product = self
            .store
            .find_product_by_id(product_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("product with id = {product_id} doesn't exist"))
            })?;

        // Every product has exactly one owning seller; a dangling reference
        // means the cascade invariant was broken in storage.
        self.store
            .find_seller_by_id(product.seller_id)
            .await?
            .ok_or_else(|| {
                DomainError::internal(format!(
                    "product {product_id} references missing seller {}",
                    product.seller_id
                ))
            })
    }
}
