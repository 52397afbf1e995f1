//! Readers racing rebuilds see whole models only.

use std::sync::Arc;
use std::thread;

use tokio_util::sync::CancellationToken;
use typesys::decl::ItemDecl;
use typesys::hir::FeatureResolver;
use typesys::meta::MetaModelAccess;
use typesys::store::DeclarationStore;
use typesys::{EngineConfig, FeatureRequest};

fn store_with(prefix: &str) -> DeclarationStore {
    let mut store = DeclarationStore::new();
    for i in 0..50 {
        store
            .register_or_merge(ItemDecl::new(format!("{prefix}{i}")).attr("code", "java.lang.String"))
            .unwrap();
    }
    store
}

#[test]
fn test_readers_never_observe_partial_models() {
    let access = Arc::new(MetaModelAccess::new(EngineConfig::default()));
    let left = store_with("Left");
    let right = store_with("Right");
    access.rebuild(&left);

    thread::scope(|scope| {
        for _ in 0..4 {
            let access = Arc::clone(&access);
            scope.spawn(move || {
                let none = CancellationToken::new();
                for _ in 0..200 {
                    let model = access.snapshot();
                    let lefts = (0..50)
                        .filter(|i| model.find_item_by_name(&format!("Left{i}")).is_some())
                        .count();
                    let rights = (0..50)
                        .filter(|i| model.find_item_by_name(&format!("Right{i}")).is_some())
                        .count();
                    assert!(
                        (lefts, rights) == (50, 0) || (lefts, rights) == (0, 50),
                        "partial model: {lefts} left, {rights} right"
                    );
                    let owner = if lefts == 50 { "Left7" } else { "Right7" };
                    let resolution = FeatureResolver::new(&model)
                        .resolve(&FeatureRequest::item(owner, "code").inherited(), &none);
                    assert_eq!(resolution.len(), 1);
                }
            });
        }

        for round in 0..20 {
            access.rebuild(if round % 2 == 0 { &right } else { &left });
        }
    });

    assert_eq!(access.generation(), typesys::meta::Generation(21));
}
