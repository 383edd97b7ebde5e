use serde::{Deserialize, Serialize};

use bazaar_core::{DomainError, DomainResult, ProductId, SellerId};

/// Product: a listed item, owned by exactly one seller.
///
/// `seller_id` is immutable after creation; a product cannot be re-assigned
/// to a different seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub seller_id: SellerId,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, seller_id: SellerId) -> Self {
        Self {
            id,
            name: name.into(),
            seller_id,
        }
    }
}

/// Validate a product name: must contain at least one non-whitespace character.
pub fn validate_product_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("product name cannot be empty"));
    }
    Ok(())
}
