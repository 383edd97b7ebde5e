//! Seller directory: seller lifecycle and seller-name uniqueness.

use std::sync::Arc;

use bazaar_core::{DomainError, DomainResult};

use crate::product::Product;
use crate::seller::{validate_seller_name, Seller};
use crate::store::MarketStore;

/// Owns the seller lifecycle (create, rename, delete) and enforces global
/// seller-name uniqueness. Deleting a seller cascades to its products.
#[derive(Clone)]
pub struct SellerDirectory {
    store: Arc<dyn MarketStore>,
}

impl SellerDirectory {
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self { store }
    }

    /// All sellers, in storage's natural order.
    pub async fn list_sellers(&self) -> DomainResult<Vec<Seller>> {
        Ok(self.store.list_sellers().await?)
    }

    /// Create a seller with an empty product set.
    pub async fn create_seller(&self, name: &str) -> DomainResult<Seller> {
        validate_seller_name(name)?;
        if self.store.seller_name_taken(name).await? {
            tracing::debug!(name, "seller create rejected: name taken");
            return Err(DomainError::conflict(format!(
                "seller name \"{name}\" is already taken"
            )));
        }

        let seller = self.store.insert_seller(name).await?;
        tracing::info!(seller_id = %seller.id, name = %seller.name, "seller created");
        Ok(seller)
    }

    /// Rename a seller in place; the identifier is unchanged.
    ///
    /// Renaming a seller to its current name is a no-op success.
    pub async fn rename_seller(&self, old_name: &str, new_name: &str) -> DomainResult<Seller> {
        let seller = self.require_seller(old_name).await?;
        validate_seller_name(new_name)?;

        if new_name == seller.name {
            return Ok(seller);
        }
        if self.store.seller_name_taken(new_name).await? {
            tracing::debug!(old_name, new_name, "seller rename rejected: name taken");
            return Err(DomainError::conflict(format!(
                "seller name \"{new_name}\" is already taken"
            )));
        }

        self.store.rename_seller(seller.id, new_name).await?;
        tracing::info!(seller_id = %seller.id, old_name, new_name, "seller renamed");
        Ok(Seller::new(seller.id, new_name))
    }

    /// Delete a seller and all of its products.
    pub async fn delete_seller(&self, name: &str) -> DomainResult<()> {
        let seller = self.require_seller(name).await?;
        self.store.delete_seller(seller.id).await?;
        tracing::info!(seller_id = %seller.id, name, "seller deleted (products cascaded)");
        Ok(())
    }

    /// All products owned by the named seller.
    pub async fn products_of(&self, name: &str) -> DomainResult<Vec<Product>> {
        let seller = self.require_seller(name).await?;
        Ok(self.store.products_of(seller.id).await?)
    }

    async fn require_seller(&self, name: &str) -> DomainResult<Seller> {
        self.store
            .find_seller_by_name(name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("seller \"{name}\" doesn't exist")))
    }
}
