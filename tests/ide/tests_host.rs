//! AnalysisHost lifecycle.

use tokio_util::sync::CancellationToken;
use typesys::decl::{EnumDecl, ItemDecl};
use typesys::meta::Generation;
use typesys::{AnalysisHost, FeatureRequest};

use crate::helpers::fixtures::*;
use crate::helpers::resolution_assertions::*;

#[test]
fn test_extension_file_contributes_to_merged_item() {
    let mut host = order_host();
    let analysis = host.analysis();
    let none = CancellationToken::new();

    let name = analysis.resolve(&FeatureRequest::item("Product", "name").inherited(), &none);
    assert_resolves_to(&name, &["Product.name"]);
    let code = analysis.resolve(&FeatureRequest::item("Product", "code").inherited(), &none);
    assert_eq!(code[0].origin(), Some(at(CORE_FILE, 150, 170)));
}

#[test]
fn test_removing_a_file_drops_its_contributions() {
    let mut host = order_host();
    host.remove_file(EXTENSION_FILE);
    let analysis = host.analysis();

    let name = analysis.resolve(
        &FeatureRequest::item("Product", "name").inherited(),
        &CancellationToken::new(),
    );
    assert!(name.is_empty());
}

#[test]
fn test_rebuild_invalidates_cached_results() {
    let mut host = order_host();
    let none = CancellationToken::new();
    let request = FeatureRequest::item("Order", "code").inherited().with_key(occurrence(0, 10));

    let before = host.analysis().resolve(&request, &none);
    let again = host.analysis().resolve(&request, &none);
    assert!(before.same_allocation(&again));
    assert_eq!(host.cache().len(), 1);

    host.rebuild();
    assert!(host.cache().is_empty());
    let after = host.analysis().resolve(&request, &none);
    assert!(!before.same_allocation(&after));
    assert_eq!(describe(&before), describe(&after));
}

#[test]
fn test_snapshot_keeps_its_model_across_rebuilds() {
    let mut host = order_host();
    let old = host.analysis();
    host.add_declaration(CORE_FILE, ItemDecl::new("Order").attr("total", "java.lang.Double"))
        .unwrap();
    let new = host.analysis();

    let request = FeatureRequest::item("Order", "total").inherited();
    let none = CancellationToken::new();
    assert!(old.resolve(&request, &none).is_empty());
    assert_resolves_to(&new.resolve(&request, &none), &["Order.total"]);
    assert_eq!(old.generation(), Generation(1));
    assert_eq!(new.generation(), Generation(2));
}

#[test]
fn test_conflicts_are_reported_after_rebuild() {
    let mut host = AnalysisHost::default();
    host.add_declaration(CORE_FILE, ItemDecl::new("Foo").extends("Bar")).unwrap();
    host.add_declaration(EXTENSION_FILE, ItemDecl::new("Foo").extends("Baz")).unwrap();
    host.analysis();

    let conflicts = host.conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].name.as_str(), "Foo");
}

#[test]
fn test_rejected_declarations_are_returned() {
    let mut host = AnalysisHost::default();
    let errors = host.set_file_declarations(
        CORE_FILE,
        vec![ItemDecl::new(" ").into(), EnumDecl::new("Color").value("RED").into()],
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "item declaration has a blank name");
    assert!(host.add_declaration(CORE_FILE, EnumDecl::new("")).is_err());

    let analysis = host.analysis();
    assert!(analysis.model().find_enum_by_name("Color").is_some());
}

#[test]
fn test_batch_resolution_keeps_request_order() {
    let mut host = order_host();
    let analysis = host.analysis();
    let requests: Vec<_> = ["code", "status", "entries", "nothing"]
        .into_iter()
        .enumerate()
        .map(|(i, feature)| {
            FeatureRequest::item("Order", feature)
                .inherited()
                .with_key(occurrence(0, i as u32 * 10))
        })
        .collect();

    let results = analysis.resolve_batch(&requests, &CancellationToken::new());
    let summary: Vec<_> = results.iter().map(describe).collect();
    assert_eq!(
        summary,
        vec![
            vec!["AbstractOrder.code".to_string()],
            vec!["Order.status".to_string()],
            vec!["AbstractOrder2OrderEntry:target".to_string()],
            vec![],
        ]
    );
    assert_eq!(host.cache().len(), 3);
}
