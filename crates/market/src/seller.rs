use serde::{Deserialize, Serialize};

use bazaar_core::{DomainError, DomainResult, SellerId};

/// Seller: owns a named, uniquely-identified collection of products.
///
/// The product collection is not held on the entity; it is derived by query
/// through [`crate::store::MarketStore::products_of`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    pub id: SellerId,
    pub name: String,
}

impl Seller {
    pub fn new(id: SellerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Validate a seller name: must contain at least one non-whitespace character.
pub fn validate_seller_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("seller name cannot be empty"));
    }
    Ok(())
}
