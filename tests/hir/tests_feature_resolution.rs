//! Feature resolution on item, relation and enum owners.

use rstest::rstest;
use tokio_util::sync::CancellationToken;
use typesys::decl::{ItemDecl, RelationDecl, RelationEndDecl};
use typesys::hir::{FeatureResolver, ResolveError};
use typesys::{FeatureRequest, ResolutionCandidate};

use crate::helpers::fixtures::*;
use crate::helpers::resolution_assertions::*;

fn resolve(declarations: Vec<typesys::decl::Declaration>, request: FeatureRequest) -> typesys::Resolution {
    let model = model_from(declarations);
    FeatureResolver::new(&model).resolve(&request, &CancellationToken::new())
}

// ============================================================================
// Item owners
// ============================================================================

#[test]
fn test_inherited_attributes_nearest_first() {
    let resolution = resolve(chain_schema(), FeatureRequest::item("A", "x").inherited());
    assert_resolves_to(&resolution, &["B.x", "C.x"]);
}

#[test]
fn test_own_level_only_without_inheritance() {
    assert!(resolve(chain_schema(), FeatureRequest::item("A", "x")).is_empty());
    assert_resolves_to(&resolve(chain_schema(), FeatureRequest::item("B", "x")), &["B.x"]);
}

#[rstest]
#[case("Order", "code", &["AbstractOrder.code"])]
#[case("Order", "status", &["Order.status"])]
#[case("Order", "entries", &["AbstractOrder2OrderEntry:target"])]
#[case("Order", "ENTRIES", &["AbstractOrder2OrderEntry:target"])]
#[case("OrderEntry", "order", &["AbstractOrder2OrderEntry:source"])]
#[case("OrderEntry", "product", &["OrderEntry2Product:target"])]
#[case("Product", "entries", &["OrderEntry2Product:source"])]
#[case("Order", "Code", &[])]
#[case("Order", "quantity", &[])]
#[case("Unknown", "code", &[])]
fn test_item_features(#[case] owner: &str, #[case] feature: &str, #[case] expected: &[&str]) {
    let resolution = resolve(core_schema(), FeatureRequest::item(owner, feature).inherited());
    assert_resolves_to(&resolution, expected);
}

#[test]
fn test_attribute_and_role_on_same_level_are_both_kept() {
    let mut declarations = core_schema();
    declarations.push(ItemDecl::new("Product").attr("entries", "java.lang.String").into());

    let resolution = resolve(declarations, FeatureRequest::item("Product", "entries"));
    assert_resolves_to(&resolution, &["Product.entries", "OrderEntry2Product:source"]);
}

#[test]
fn test_malformed_relation_end_is_skipped() {
    let mut declarations = core_schema();
    declarations.push(
        RelationDecl::new(
            "Broken",
            RelationEndDecl {
                qualifier: Some("orphans".into()),
                ..Default::default()
            },
            RelationEndDecl::new("owner", "Product"),
        )
        .into(),
    );
    let model = model_from(declarations);
    let resolver = FeatureResolver::new(&model);
    let none = CancellationToken::new();

    assert!(resolver.resolve(&FeatureRequest::item("Product", "orphans"), &none).is_empty());
    // The well-formed parts of the schema still resolve.
    assert_resolves_to(
        &resolver.resolve(&FeatureRequest::item("Product", "code"), &none),
        &["Product.code"],
    );
    assert!(resolver.resolve(&FeatureRequest::relation("Broken", "source"), &none).is_empty());
    assert_resolves_to(
        &resolver.resolve(&FeatureRequest::relation("Broken", "target"), &none),
        &["Broken:target"],
    );
}

// ============================================================================
// Relation owners
// ============================================================================

#[rstest]
#[case("source", &["OrderEntry2Product:source"])]
#[case("Source", &["OrderEntry2Product:source"])]
#[case("TARGET", &["OrderEntry2Product:target"])]
#[case("qty", &["Link.qty"])]
#[case("sequenceNumber", &["Link.sequenceNumber"])]
#[case("sequencenumber", &[])]
#[case("product", &[])]
fn test_relation_features(#[case] feature: &str, #[case] expected: &[&str]) {
    let resolution = resolve(core_schema(), FeatureRequest::relation("OrderEntry2Product", feature));
    assert_resolves_to(&resolution, expected);
}

#[test]
fn test_relation_source_points_at_its_item() {
    let resolution = resolve(core_schema(), FeatureRequest::relation("OrderEntry2Product", "source"));
    let ResolutionCandidate::RelationEnd(end) = resolution.single().unwrap() else {
        panic!("expected a relation end");
    };
    assert_eq!(end.type_name.as_deref(), Some("OrderEntry"));
    assert_eq!(resolution[0].type_name().map(|n| n.as_str()), Some("OrderEntry"));
}

#[test]
fn test_link_fallback_uses_inherited_attributes() {
    let mut declarations = core_schema();
    declarations.push(ItemDecl::new("GenericItem").attr("pk", "java.lang.Long").into());

    let resolution = resolve(declarations, FeatureRequest::relation("OrderEntry2Product", "pk"));
    assert_resolves_to(&resolution, &["GenericItem.pk"]);
}

#[test]
fn test_unknown_relation_is_empty() {
    assert!(resolve(core_schema(), FeatureRequest::relation("Nope", "source")).is_empty());
}

// ============================================================================
// Enum owners
// ============================================================================

#[rstest]
#[case("code", &["enum OrderStatus"])]
#[case("name", &["enum OrderStatus"])]
#[case("Code", &[])]
#[case("CREATED", &[])]
#[case("somethingElse", &[])]
fn test_enum_features(#[case] feature: &str, #[case] expected: &[&str]) {
    let resolution = resolve(core_schema(), FeatureRequest::enumeration("OrderStatus", feature));
    assert_resolves_to(&resolution, expected);
}

// ============================================================================
// Strict resolution
// ============================================================================

#[test]
fn test_strict_resolution_reports_ambiguity() {
    let model = model_from(chain_schema());
    let resolver = FeatureResolver::new(&model);
    let none = CancellationToken::new();

    let err = resolver
        .resolve_single(&FeatureRequest::item("A", "x").inherited(), &none)
        .unwrap_err();
    assert_eq!(err.to_string(), "'x' on item 'A' is ambiguous (2 candidates)");

    let err = resolver
        .resolve_single(&FeatureRequest::item("A", "y").inherited(), &none)
        .unwrap_err();
    assert!(matches!(err, ResolveError::Unresolved { .. }));
}
