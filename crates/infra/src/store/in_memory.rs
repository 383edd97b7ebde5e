use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use bazaar_core::{ProductId, SellerId};
use bazaar_market::{MarketStore, Product, Seller, StoreError};

#[derive(Debug, Default)]
struct Inner {
    sellers: BTreeMap<SellerId, Seller>,
    products: BTreeMap<ProductId, Product>,
    next_seller_id: i64,
    next_product_id: i64,
}

/// In-memory `MarketStore`.
///
/// Intended for tests/dev. Every mutation runs under a single write lock, so
/// the check-then-write sequence inside each operation is atomic, matching
/// the transactional contract of the relational backend. Uniqueness is
/// enforced here the way the database constraints enforce it, so a caller
/// skipping the service-level pre-check still gets `UniqueViolation`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned() -> StoreError {
    StoreError::Backend("lock poisoned".to_string())
}

#[async_trait]
impl MarketStore for InMemoryStore {
    async fn list_sellers(&self) -> Result<Vec<Seller>, StoreError> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        Ok(inner.sellers.values().cloned().collect())
    }

    async fn find_seller_by_name(&self, name: &str) -> Result<Option<Seller>, StoreError> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        Ok(inner.sellers.values().find(|s| s.name == name).cloned())
    }

    async fn find_seller_by_id(&self, id: SellerId) -> Result<Option<Seller>, StoreError> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        Ok(inner.sellers.get(&id).cloned())
    }

    async fn seller_name_taken(&self, name: &str) -> Result<bool, StoreError> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        Ok(inner.sellers.values().any(|s| s.name == name))
    }

    async fn insert_seller(&self, name: &str) -> Result<Seller, StoreError> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        if inner.sellers.values().any(|s| s.name == name) {
            return Err(StoreError::UniqueViolation(format!(
                "sellers.name: \"{name}\""
            )));
        }

        inner.next_seller_id += 1;
        let seller = Seller::new(SellerId::new(inner.next_seller_id), name);
        inner.sellers.insert(seller.id, seller.clone());
        Ok(seller)
    }

    async fn rename_seller(&self, id: SellerId, new_name: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        if inner.sellers.values().any(|s| s.id != id && s.name == new_name) {
            return Err(StoreError::UniqueViolation(format!(
                "sellers.name: \"{new_name}\""
            )));
        }

        match inner.sellers.get_mut(&id) {
            Some(seller) => {
                seller.name = new_name.to_string();
                Ok(())
            }
            None => Err(StoreError::Backend(format!("no seller row with id {id}"))),
        }
    }

    async fn delete_seller(&self, id: SellerId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        if inner.sellers.remove(&id).is_none() {
            return Err(StoreError::Backend(format!("no seller row with id {id}")));
        }
        // Cascade, under the same lock as the seller removal.
        inner.products.retain(|_, p| p.seller_id != id);
        Ok(())
    }

    async fn products_of(&self, seller_id: SellerId) -> Result<Vec<Product>, StoreError> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        Ok(inner
            .products
            .values()
            .filter(|p| p.seller_id == seller_id)
            .cloned()
            .collect())
    }

    async fn find_product_by_name(
        &self,
        seller_id: SellerId,
        name: &str,
    ) -> Result<Option<Product>, StoreError> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        Ok(inner
            .products
            .values()
            .find(|p| p.seller_id == seller_id && p.name == name)
            .cloned())
    }

    async fn find_product_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        Ok(inner.products.get(&id).cloned())
    }

    async fn insert_product(
        &self,
        seller_id: SellerId,
        name: &str,
    ) -> Result<Product, StoreError> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        if !inner.sellers.contains_key(&seller_id) {
            return Err(StoreError::Backend(format!(
                "no seller row with id {seller_id}"
            )));
        }
        if inner
            .products
            .values()
            .any(|p| p.seller_id == seller_id && p.name == name)
        {
            return Err(StoreError::UniqueViolation(format!(
                "products(seller_id, name): ({seller_id}, \"{name}\")"
            )));
        }

        inner.next_product_id += 1;
        let product = Product::new(ProductId::new(inner.next_product_id), name, seller_id);
        inner.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn rename_product(&self, id: ProductId, new_name: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        let seller_id = match inner.products.get(&id) {
            Some(p) => p.seller_id,
            None => return Err(StoreError::Backend(format!("no product row with id {id}"))),
        };
        if inner
            .products
            .values()
            .any(|p| p.id != id && p.seller_id == seller_id && p.name == new_name)
        {
            return Err(StoreError::UniqueViolation(format!(
                "products(seller_id, name): ({seller_id}, \"{new_name}\")"
            )));
        }

        // Presence checked above; the row cannot have vanished under the lock.
        if let Some(product) = inner.products.get_mut(&id) {
            product.name = new_name.to_string();
        }
        Ok(())
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        if inner.products.remove(&id).is_none() {
            return Err(StoreError::Backend(format!("no product row with id {id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn assigns_monotonically_increasing_ids() {
        let store = InMemoryStore::new();
        let a = store.insert_seller("a").await.unwrap();
        let b = store.insert_seller("b").await.unwrap();
        assert!(b.id.as_i64() > a.id.as_i64());
    }

    #[tokio::test]
    async fn insert_seller_enforces_name_uniqueness() {
        let store = InMemoryStore::new();
        store.insert_seller("acme").await.unwrap();
        let err = store.insert_seller("acme").await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));
    }

    #[tokio::test]
    async fn insert_product_scopes_uniqueness_to_seller() {
        let store = InMemoryStore::new();
        let acme = store.insert_seller("acme").await.unwrap();
        let other = store.insert_seller("other").await.unwrap();

        store.insert_product(acme.id, "widget").await.unwrap();
        let err = store.insert_product(acme.id, "widget").await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));

        // Same name under a different seller is fine.
        store.insert_product(other.id, "widget").await.unwrap();
    }

    #[tokio::test]
    async fn rename_product_excludes_self_from_uniqueness_check() {
        let store = InMemoryStore::new();
        let acme = store.insert_seller("acme").await.unwrap();
        let widget = store.insert_product(acme.id, "widget").await.unwrap();

        store.rename_product(widget.id, "widget").await.unwrap();
        let found = store.find_product_by_id(widget.id).await.unwrap().unwrap();
        assert_eq!(found.name, "widget");
    }

    #[tokio::test]
    async fn delete_seller_cascades_to_products() {
        let store = InMemoryStore::new();
        let acme = store.insert_seller("acme").await.unwrap();
        let p1 = store.insert_product(acme.id, "widget").await.unwrap();
        let p2 = store.insert_product(acme.id, "gadget").await.unwrap();

        store.delete_seller(acme.id).await.unwrap();

        assert!(store.find_product_by_id(p1.id).await.unwrap().is_none());
        assert!(store.find_product_by_id(p2.id).await.unwrap().is_none());
        assert!(store.find_seller_by_id(acme.id).await.unwrap().is_none());
    }
}
