//! `bazaar-market` — marketplace domain layer.
//!
//! Entities (`Seller`, `Product`), the abstract persistence port
//! (`MarketStore`), and the services that enforce the marketplace invariants:
//! seller names are globally unique, product names are unique within a
//! seller, and every product has exactly one owning seller.

pub mod directory;
pub mod ledger;
pub mod lookup;
pub mod product;
pub mod seller;
pub mod store;

pub use directory::SellerDirectory;
pub use ledger::ProductLedger;
pub use lookup::SellerLookup;
pub use product::Product;
pub use seller::Seller;
pub use store::{MarketStore, StoreError};
