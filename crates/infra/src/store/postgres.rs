//! Postgres-backed `MarketStore` implementation.
//!
//! Persistence for sellers and products in the two-table layout
//! `sellers(id, name unique)` / `products(id, name, seller_id)` with a
//! uniqueness constraint on `(seller_id, name)`. The database constraints are
//! the authoritative uniqueness enforcement: SQLSTATE `23505` maps to
//! `StoreError::UniqueViolation`, everything else to `StoreError::Backend`.
//!
//! The seller-delete cascade is handled by `ON DELETE CASCADE`, so every
//! mutating operation here is a single atomic statement.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::instrument;

use bazaar_core::{ProductId, SellerId};
use bazaar_market::{MarketStore, Product, Seller, StoreError};

const SCHEMA: &str = include_str!("../../migrations/0001_init.sql");

/// Postgres-backed store. `Clone` is cheap (pool handle).
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the schema (idempotent).
    #[instrument(skip(self), err)]
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("migrate", e))?;
        Ok(())
    }
}

#[async_trait]
impl MarketStore for PostgresStore {
    async fn list_sellers(&self) -> Result<Vec<Seller>, StoreError> {
        let rows = sqlx::query("SELECT id, name FROM sellers ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_sellers", e))?;

        rows.iter().map(seller_from_row).collect()
    }

    async fn find_seller_by_name(&self, name: &str) -> Result<Option<Seller>, StoreError> {
        let row = sqlx::query("SELECT id, name FROM sellers WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_seller_by_name", e))?;

        row.as_ref().map(seller_from_row).transpose()
    }

    async fn find_seller_by_id(&self, id: SellerId) -> Result<Option<Seller>, StoreError> {
        let row = sqlx::query("SELECT id, name FROM sellers WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_seller_by_id", e))?;

        row.as_ref().map(seller_from_row).transpose()
    }

    async fn seller_name_taken(&self, name: &str) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT EXISTS (SELECT 1 FROM sellers WHERE name = $1) AS taken")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("seller_name_taken", e))?;

        row.try_get::<bool, _>("taken")
            .map_err(|e| StoreError::Backend(format!("failed to decode row: {e}")))
    }

    async fn insert_seller(&self, name: &str) -> Result<Seller, StoreError> {
        let row = sqlx::query("INSERT INTO sellers (name) VALUES ($1) RETURNING id, name")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert_seller", e))?;

        seller_from_row(&row)
    }

    async fn rename_seller(&self, id: SellerId, new_name: &str) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE sellers SET name = $1 WHERE id = $2")
            .bind(new_name)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("rename_seller", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Backend(format!("no seller row with id {id}")));
        }
        Ok(())
    }

    async fn delete_seller(&self, id: SellerId) -> Result<(), StoreError> {
        // ON DELETE CASCADE removes the seller's products in the same
        // transaction as the seller row.
        let result = sqlx::query("DELETE FROM sellers WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_seller", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Backend(format!("no seller row with id {id}")));
        }
        Ok(())
    }

    async fn products_of(&self, seller_id: SellerId) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, name, seller_id FROM products WHERE seller_id = $1 ORDER BY id ASC",
        )
        .bind(seller_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("products_of", e))?;

        rows.iter().map(product_from_row).collect()
    }

    async fn find_product_by_name(
        &self,
        seller_id: SellerId,
        name: &str,
    ) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(
            "SELECT id, name, seller_id FROM products WHERE seller_id = $1 AND name = $2",
        )
        .bind(seller_id.as_i64())
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_product_by_name", e))?;

        row.as_ref().map(product_from_row).transpose()
    }

    async fn find_product_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query("SELECT id, name, seller_id FROM products WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_product_by_id", e))?;

        row.as_ref().map(product_from_row).transpose()
    }

    async fn insert_product(
        &self,
        seller_id: SellerId,
        name: &str,
    ) -> Result<Product, StoreError> {
        let row = sqlx::query(
            "INSERT INTO products (name, seller_id) VALUES ($1, $2) RETURNING id, name, seller_id",
        )
        .bind(name)
        .bind(seller_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_product", e))?;

        product_from_row(&row)
    }

    async fn rename_product(&self, id: ProductId, new_name: &str) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE products SET name = $1 WHERE id = $2")
            .bind(new_name)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("rename_product", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Backend(format!("no product row with id {id}")));
        }
        Ok(())
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_product", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Backend(format!("no product row with id {id}")));
        }
        Ok(())
    }
}

fn seller_from_row(row: &sqlx::postgres::PgRow) -> Result<Seller, StoreError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| StoreError::Backend(format!("failed to decode seller row: {e}")))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| StoreError::Backend(format!("failed to decode seller row: {e}")))?;
    Ok(Seller::new(SellerId::new(id), name))
}

fn product_from_row(row: &sqlx::postgres::PgRow) -> Result<Product, StoreError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| StoreError::Backend(format!("failed to decode product row: {e}")))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| StoreError::Backend(format!("failed to decode product row: {e}")))?;
    let seller_id: i64 = row
        .try_get("seller_id")
        .map_err(|e| StoreError::Backend(format!("failed to decode product row: {e}")))?;
    Ok(Product::new(
        ProductId::new(id),
        name,
        SellerId::new(seller_id),
    ))
}

/// Map SQLx errors to `StoreError`.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                // Unique violation: the constraint is the authoritative
                // uniqueness check.
                Some("23505") => StoreError::UniqueViolation(msg),
                _ => StoreError::Backend(msg),
            }
        }
        other => StoreError::Backend(format!("sqlx error in {operation}: {other}")),
    }
}
