//! Request builders for the import and query front ends, plus diagnostics.

use rstest::rstest;
use tokio_util::sync::CancellationToken;
use typesys::hir::{ResolveError, Severity, codes};
use typesys::{FeatureRequest, OwnerKind};

use crate::helpers::fixtures::*;
use crate::helpers::resolution_assertions::*;

#[rstest]
#[case("Order", "code", OwnerKind::Item, &["AbstractOrder.code"])]
#[case("OrderEntry2Product", "source", OwnerKind::Relation, &["OrderEntry2Product:source"])]
#[case("OrderEntry2Product", "qty", OwnerKind::Relation, &["Link.qty"])]
#[case("OrderStatus", "code", OwnerKind::Enum, &["enum OrderStatus"])]
fn test_import_header_parameters(
    #[case] header: &str,
    #[case] parameter: &str,
    #[case] kind: OwnerKind,
    #[case] expected: &[&str],
) {
    let mut host = order_host();
    let analysis = host.analysis();
    let request = FeatureRequest::import_header(analysis.model(), header, parameter, occurrence(0, 0)).unwrap();
    assert_eq!(request.owner_kind, kind);
    assert_resolves_to(&analysis.resolve(&request, &CancellationToken::new()), expected);
}

#[rstest]
#[case("{o.code}", &["AbstractOrder.code"])]
#[case("{o:status}", &["Order.status"])]
#[case("{entries:o}", &["AbstractOrder2OrderEntry:target"])]
#[case("{o.date[en]}", &["AbstractOrder.date"])]
fn test_query_columns(#[case] column: &str, #[case] expected: &[&str]) {
    let mut host = order_host();
    let analysis = host.analysis();
    let request = FeatureRequest::query_column(analysis.model(), "Order", column, occurrence(0, 0)).unwrap();
    assert_resolves_to(&analysis.resolve(&request, &CancellationToken::new()), expected);
}

#[test]
fn test_goto_declaration() {
    let mut host = order_host();
    let analysis = host.analysis();
    let none = CancellationToken::new();

    let target = analysis
        .goto_declaration(&FeatureRequest::item("Product", "code").inherited(), &none)
        .unwrap();
    assert_eq!(target.origin(), Some(at(CORE_FILE, 150, 170)));

    let cancelled = CancellationToken::new();
    cancelled.cancel();
    assert_eq!(
        analysis.goto_declaration(&FeatureRequest::item("Product", "code"), &cancelled),
        Err(ResolveError::Cancelled)
    );
}

#[test]
fn test_check_occurrences() {
    let mut host = host_with(vec![(CORE_FILE, core_schema()), (EXTENSION_FILE, chain_schema())]);
    let analysis = host.analysis();
    let requests = vec![
        FeatureRequest::item("Order", "code").inherited().with_key(occurrence(0, 0)),
        FeatureRequest::item("Order", "colour").inherited().with_key(occurrence(0, 10)),
        FeatureRequest::item("Missing", "code").inherited().with_key(occurrence(0, 20)),
        FeatureRequest::item("A", "x").inherited().with_key(occurrence(0, 30)),
    ];
    let none = CancellationToken::new();

    let lenient = analysis.check_occurrences(&requests, false, &none);
    let codes_found: Vec<_> = lenient.iter().map(|d| d.code).collect();
    assert_eq!(codes_found, [codes::UNRESOLVED_FEATURE, codes::UNKNOWN_OWNER]);
    assert_eq!(lenient[0].key, Some(occurrence(0, 10)));
    assert_eq!(lenient[0].severity, Severity::Error);

    let strict = analysis.check_occurrences(&requests, true, &none);
    assert_eq!(strict.len(), 3);
    assert_eq!(strict[2].severity, Severity::Warning);

    let cancelled = CancellationToken::new();
    cancelled.cancel();
    assert!(analysis.check_occurrences(&requests, true, &cancelled).is_empty());
}
