//! Integration tests for the full service stack against the in-memory store.
//!
//! Tests: SellerDirectory / ProductLedger / SellerLookup → MarketStore
//!
//! Verifies:
//! - Seller names stay unique across the directory after every operation
//! - Product names stay unique per seller (but may repeat across sellers)
//! - Seller deletion cascades to owned products
//! - The reverse lookup follows renames

use std::sync::Arc;

use bazaar_core::{DomainError, ProductId};
use bazaar_market::{MarketStore, ProductLedger, SellerDirectory, SellerLookup};

use crate::store::InMemoryStore;

fn setup() -> (Arc<InMemoryStore>, SellerDirectory, ProductLedger, SellerLookup) {
    let store = Arc::new(InMemoryStore::new());
    let directory = SellerDirectory::new(store.clone());
    let ledger = ProductLedger::new(store.clone());
    let lookup = SellerLookup::new(store.clone());
    (store, directory, ledger, lookup)
}

#[tokio::test]
async fn create_seller_rejects_blank_names() {
    let (_, directory, _, _) = setup();

    for name in ["", "   "] {
        let err = directory.create_seller(name).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)), "name: {name:?}");
    }
}

#[tokio::test]
async fn duplicate_seller_name_conflicts() {
    let (_, directory, _, _) = setup();

    directory.create_seller("acme").await.unwrap();
    let err = directory.create_seller("acme").await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    // The first registration is still intact.
    let sellers = directory.list_sellers().await.unwrap();
    assert_eq!(sellers.len(), 1);
    assert_eq!(sellers[0].name, "acme");
}

#[tokio::test]
async fn rename_seller_keeps_identifier_and_rechecks_uniqueness() {
    let (_, directory, _, _) = setup();

    let acme = directory.create_seller("acme").await.unwrap();
    directory.create_seller("globex").await.unwrap();

    let renamed = directory.rename_seller("acme", "initech").await.unwrap();
    assert_eq!(renamed.id, acme.id);
    assert_eq!(renamed.name, "initech");

    let err = directory
        .rename_seller("initech", "globex")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
}

#[tokio::test]
async fn rename_seller_to_current_name_is_noop_success() {
    let (_, directory, _, _) = setup();

    let acme = directory.create_seller("acme").await.unwrap();
    let renamed = directory.rename_seller("acme", "acme").await.unwrap();
    assert_eq!(renamed, acme);
}

#[tokio::test]
async fn rename_unknown_seller_not_found() {
    let (_, directory, _, _) = setup();

    let err = directory.rename_seller("ghost", "x").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn delete_seller_cascades_to_products() {
    let (store, directory, ledger, lookup) = setup();

    directory.create_seller("acme").await.unwrap();
    let p1 = ledger.add_product("acme", "widget").await.unwrap();
    let p2 = ledger.add_product("acme", "gadget").await.unwrap();

    directory.delete_seller("acme").await.unwrap();

    let err = directory.products_of("acme").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));

    // Products are gone from storage, not just hidden.
    assert!(store.find_product_by_id(p1.id).await.unwrap().is_none());
    assert!(store.find_product_by_id(p2.id).await.unwrap().is_none());

    let err = lookup.owning_seller(p1.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn delete_unknown_seller_not_found() {
    let (_, directory, _, _) = setup();

    let err = directory.delete_seller("ghost").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn product_names_are_unique_per_seller_only() {
    let (_, directory, ledger, _) = setup();

    directory.create_seller("acme").await.unwrap();
    directory.create_seller("other").await.unwrap();

    ledger.add_product("acme", "widget").await.unwrap();
    let err = ledger.add_product("acme", "widget").await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    // Different sellers may list the same product name.
    ledger.add_product("other", "widget").await.unwrap();

    let acme_products = directory.products_of("acme").await.unwrap();
    assert_eq!(acme_products.len(), 1);
}

#[tokio::test]
async fn add_product_validates_name_and_seller() {
    let (_, directory, ledger, _) = setup();

    let err = ledger.add_product("ghost", "widget").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));

    directory.create_seller("acme").await.unwrap();
    let err = ledger.add_product("acme", "  ").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn rename_product_then_lookup_returns_owner() {
    let (_, directory, ledger, lookup) = setup();

    directory.create_seller("acme").await.unwrap();
    let widget = ledger.add_product("acme", "widget").await.unwrap();

    let gadget = ledger
        .rename_product("acme", "widget", "gadget")
        .await
        .unwrap();
    assert_eq!(gadget.id, widget.id);
    assert_eq!(gadget.name, "gadget");

    let owner = lookup.owning_seller(gadget.id).await.unwrap();
    assert_eq!(owner.name, "acme");
}

#[tokio::test]
async fn rename_product_to_current_name_is_noop_success() {
    let (_, directory, ledger, _) = setup();

    directory.create_seller("acme").await.unwrap();
    let widget = ledger.add_product("acme", "widget").await.unwrap();

    let same = ledger
        .rename_product("acme", "widget", "widget")
        .await
        .unwrap();
    assert_eq!(same, widget);
}

#[tokio::test]
async fn rename_product_to_taken_name_conflicts() {
    let (_, directory, ledger, _) = setup();

    directory.create_seller("acme").await.unwrap();
    ledger.add_product("acme", "widget").await.unwrap();
    ledger.add_product("acme", "gadget").await.unwrap();

    let err = ledger
        .rename_product("acme", "widget", "gadget")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
}

#[tokio::test]
async fn rename_unknown_product_not_found() {
    let (_, directory, ledger, _) = setup();

    directory.create_seller("acme").await.unwrap();
    let err = ledger
        .rename_product("acme", "ghost", "gadget")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn delete_product_frees_its_name() {
    let (_, directory, ledger, _) = setup();

    directory.create_seller("acme").await.unwrap();
    ledger.add_product("acme", "widget").await.unwrap();
    ledger.delete_product("acme", "widget").await.unwrap();

    assert!(directory.products_of("acme").await.unwrap().is_empty());

    // The name is free for re-use after deletion.
    ledger.add_product("acme", "widget").await.unwrap();
}

#[tokio::test]
async fn delete_unknown_product_not_found() {
    let (_, directory, ledger, _) = setup();

    directory.create_seller("acme").await.unwrap();
    let err = ledger.delete_product("acme", "ghost").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn lookup_unknown_product_not_found() {
    let (_, _, _, lookup) = setup();

    let err = lookup.owning_seller(ProductId::new(999)).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// One step of an arbitrary operation sequence. Names are drawn from a
    /// small pool so collisions (the interesting case) happen often.
    #[derive(Debug, Clone)]
    enum Op {
        CreateSeller(usize),
        RenameSeller(usize, usize),
        DeleteSeller(usize),
        AddProduct(usize, usize),
        RenameProduct(usize, usize, usize),
        DeleteProduct(usize, usize),
    }

    const SELLER_POOL: [&str; 3] = ["acme", "globex", "initech"];
    const PRODUCT_POOL: [&str; 3] = ["widget", "gadget", "doohickey"];

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..3usize).prop_map(Op::CreateSeller),
            (0..3usize, 0..3usize).prop_map(|(a, b)| Op::RenameSeller(a, b)),
            (0..3usize).prop_map(Op::DeleteSeller),
            (0..3usize, 0..3usize).prop_map(|(s, p)| Op::AddProduct(s, p)),
            (0..3usize, 0..3usize, 0..3usize)
                .prop_map(|(s, a, b)| Op::RenameProduct(s, a, b)),
            (0..3usize, 0..3usize).prop_map(|(s, p)| Op::DeleteProduct(s, p)),
        ]
    }

    async fn apply(directory: &SellerDirectory, ledger: &ProductLedger, op: &Op) {
        // Domain rejections (conflict, not-found) are expected along the way;
        // the property only cares about the state that results.
        let _ = match op {
            Op::CreateSeller(s) => directory.create_seller(SELLER_POOL[*s]).await.map(|_| ()),
            Op::RenameSeller(a, b) => directory
                .rename_seller(SELLER_POOL[*a], SELLER_POOL[*b])
                .await
                .map(|_| ()),
            Op::DeleteSeller(s) => directory.delete_seller(SELLER_POOL[*s]).await,
            Op::AddProduct(s, p) => ledger
                .add_product(SELLER_POOL[*s], PRODUCT_POOL[*p])
                .await
                .map(|_| ()),
            Op::RenameProduct(s, a, b) => ledger
                .rename_product(SELLER_POOL[*s], PRODUCT_POOL[*a], PRODUCT_POOL[*b])
                .await
                .map(|_| ()),
            Op::DeleteProduct(s, p) => {
                ledger.delete_product(SELLER_POOL[*s], PRODUCT_POOL[*p]).await
            }
        };
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: after any operation sequence, seller names are unique
        /// and product names are unique per seller.
        #[test]
        fn uniqueness_invariants_hold_after_any_sequence(
            ops in proptest::collection::vec(op_strategy(), 0..40)
        ) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .build()
                .expect("failed to build runtime");

            rt.block_on(async {
                let (store, directory, ledger, _) = setup();

                for op in &ops {
                    apply(&directory, &ledger, op).await;
                }

                let sellers = store.list_sellers().await.unwrap();
                let names: HashSet<&str> = sellers.iter().map(|s| s.name.as_str()).collect();
                assert_eq!(names.len(), sellers.len(), "duplicate seller names");

                for seller in &sellers {
                    let products = store.products_of(seller.id).await.unwrap();
                    let product_names: HashSet<&str> =
                        products.iter().map(|p| p.name.as_str()).collect();
                    assert_eq!(
                        product_names.len(),
                        products.len(),
                        "duplicate product names under seller {}",
                        seller.name
                    );
                    for product in &products {
                        assert_eq!(product.seller_id, seller.id);
                    }
                }
            });
        }
    }
}
