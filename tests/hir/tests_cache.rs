//! Resolution cache: keys, cancellation and invalidation.

use tokio_util::sync::CancellationToken;
use typesys::FeatureRequest;
use typesys::decl::ItemDecl;
use typesys::hir::{FeatureResolver, ResolutionCache};

use crate::helpers::fixtures::*;
use crate::helpers::resolution_assertions::*;

#[test]
fn test_cancelled_resolve_leaves_cache_untouched() {
    let model = model_from(core_schema());
    let cache = ResolutionCache::new();
    let resolver = FeatureResolver::new(&model).with_cache(&cache);
    let request = FeatureRequest::item("Order", "code").inherited().with_key(occurrence(0, 10));

    let cancelled = CancellationToken::new();
    cancelled.cancel();
    assert!(resolver.resolve(&request, &cancelled).is_empty());
    assert!(cache.is_empty());

    let fresh = resolver.resolve(&request, &CancellationToken::new());
    assert_resolves_to(&fresh, &["AbstractOrder.code"]);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cancelled_resolve_does_not_serve_from_cache() {
    let model = model_from(core_schema());
    let cache = ResolutionCache::new();
    let resolver = FeatureResolver::new(&model).with_cache(&cache);
    let request = FeatureRequest::item("Order", "code").inherited().with_key(occurrence(0, 10));
    resolver.resolve(&request, &CancellationToken::new());

    let cancelled = CancellationToken::new();
    cancelled.cancel();
    assert!(resolver.resolve(&request, &cancelled).is_empty());
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_changed_request_at_same_key_is_recomputed() {
    let model = model_from(core_schema());
    let cache = ResolutionCache::new();
    let resolver = FeatureResolver::new(&model).with_cache(&cache);
    let none = CancellationToken::new();

    let key = occurrence(0, 10);
    let code = resolver.resolve(&FeatureRequest::item("Order", "code").inherited().with_key(key), &none);
    assert_resolves_to(&code, &["AbstractOrder.code"]);

    // The user edited `code` into `date` without the range moving.
    let date = resolver.resolve(&FeatureRequest::item("Order", "date").inherited().with_key(key), &none);
    assert_resolves_to(&date, &["AbstractOrder.date"]);
}

#[test]
fn test_new_generation_misses() {
    let cache = ResolutionCache::new();
    let none = CancellationToken::new();
    let request = FeatureRequest::item("Order", "code").inherited().with_key(occurrence(0, 10));

    let first_model = model_from(core_schema());
    let first = FeatureResolver::new(&first_model).with_cache(&cache).resolve(&request, &none);

    let mut store = typesys::store::DeclarationStore::new();
    store.register_all(core_schema());
    store.register_or_merge(ItemDecl::new("Order").attr("code", "int")).unwrap();
    let second_model = typesys::meta::MetaModel::build(
        &store,
        &typesys::EngineConfig::default(),
        typesys::meta::Generation(2),
    );
    let second = FeatureResolver::new(&second_model).with_cache(&cache).resolve(&request, &none);

    assert!(!first.same_allocation(&second));
    assert_resolves_to(&second, &["Order.code", "AbstractOrder.code"]);
}

#[test]
fn test_sibling_edit_invalidates_scope() {
    let model = model_from(core_schema());
    let cache = ResolutionCache::new();
    let resolver = FeatureResolver::new(&model).with_cache(&cache);
    let none = CancellationToken::new();

    for (scope, start, feature) in [(0, 10, "code"), (0, 20, "status"), (1, 10, "date")] {
        let request = FeatureRequest::item("Order", feature)
            .inherited()
            .with_key(occurrence(scope, start));
        resolver.resolve(&request, &none);
    }
    assert_eq!(cache.len(), 3);

    assert_eq!(cache.on_occurrence_changed(&occurrence(0, 20)), 2);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_requests_without_key_are_not_cached() {
    let model = model_from(core_schema());
    let cache = ResolutionCache::new();
    let resolver = FeatureResolver::new(&model).with_cache(&cache);
    resolver.resolve(&FeatureRequest::item("Order", "code").inherited(), &CancellationToken::new());
    assert!(cache.is_empty());
}
