//! Product ledger: product lifecycle and per-seller name uniqueness.

use std::sync::Arc;

use bazaar_core::{DomainError, DomainResult};

use crate::product::{validate_product_name, Product};
use crate::seller::Seller;
use crate::store::MarketStore;

/// Owns the product lifecycle (add, rename, delete) under an owning seller,
/// enforcing product-name uniqueness *within that seller's* product set.
/// Products of different sellers may share a name.
#[derive(Clone)]
pub struct ProductLedger {
    store: Arc<dyn MarketStore>,
}

impl ProductLedger {
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self { store }
    }

    /// Create a product attached to the named seller.
    pub async fn add_product(&self, seller_name: &str, product_name: &str) -> DomainResult<Product> {
        let seller = self.require_seller(seller_name).await?;
        validate_product_name(product_name)?;

        if self
            .store
            .find_product_by_name(seller.id, product_name)
            .await?
            .is_some()
        {
            tracing::debug!(seller_name, product_name, "product add rejected: name taken");
            return Err(DomainError::conflict(format!(
                "product \"{product_name}\" already exists for seller \"{seller_name}\""
            )));
        }

        let product = self.store.insert_product(seller.id, product_name).await?;
        tracing::info!(
            product_id = %product.id,
            seller_id = %seller.id,
            name = %product.name,
            "product added"
        );
        Ok(product)
    }

    /// Rename a product in place; ownership and identifier are unchanged.
    ///
    /// Renaming a product to its current name is a no-op success.
    pub async fn rename_product(
        &self,
        seller_name: &str,
        old_name: &str,
        new_name: &str,
    ) -> DomainResult<Product> {
        let seller = self.require_seller(seller_name).await?;
        validate_product_name(new_name)?;

        let product = self.require_product(&seller, old_name).await?;
        if new_name == product.name {
            return Ok(product);
        }
        if self
            .store
            .find_product_by_name(seller.id, new_name)
            .await?
            .is_some()
        {
            tracing::debug!(seller_name, old_name, new_name, "product rename rejected: name taken");
            return Err(DomainError::conflict(format!(
                "product \"{new_name}\" already exists for seller \"{seller_name}\""
            )));
        }

        self.store.rename_product(product.id, new_name).await?;
        tracing::info!(product_id = %product.id, old_name, new_name, "product renamed");
        Ok(Product::new(product.id, new_name, product.seller_id))
    }

    /// Remove a product from the named seller's set and delete its record.
    pub async fn delete_product(&self, seller_name: &str, product_name: &str) -> DomainResult<()> {
        let seller = self.require_seller(seller_name).await?;
        let product = self.require_product(&seller, product_name).await?;

        self.store.delete_product(product.id).await?;
        tracing::info!(product_id = %product.id, seller_name, product_name, "product deleted");
        Ok(())
    }

    async fn require_seller(&self, name: &str) -> DomainResult<Seller> {
        self.store
            .find_seller_by_name(name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("seller \"{name}\" doesn't exist")))
    }

    async fn require_product(&self, seller: &Seller, name: &str) -> DomainResult<Product> {
        self.store
            .find_product_by_name(seller.id, name)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "product \"{name}\" doesn't exist for seller \"{}\"",
                    seller.name
                ))
            })
    }
}
