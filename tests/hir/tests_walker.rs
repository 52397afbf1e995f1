//! Inheritance walker tests.

use rstest::rstest;
use typesys::decl::ItemDecl;
use typesys::hir::InheritanceWalker;

use crate::helpers::fixtures::*;

fn ancestry(declarations: Vec<typesys::decl::Declaration>, start: &str) -> Vec<String> {
    let model = model_from(declarations);
    InheritanceWalker::new(&model)
        .ancestry_of(start)
        .map(|item| item.name.to_string())
        .collect()
}

#[test]
fn test_cycle_visits_each_item_once() {
    let model = model_from(cyclic_schema());
    let walker = InheritanceWalker::new(&model);
    let a = model.find_item_by_name("A").unwrap();

    let mut visited = Vec::new();
    walker.walk_ancestry(a, |item| visited.push(item.name.to_string()));
    assert_eq!(visited, ["A", "B"]);
}

#[rstest]
#[case("A", &["A", "B", "C", "GenericItem"])]
#[case("B", &["B", "C", "GenericItem"])]
#[case("C", &["C", "GenericItem"])]
#[case("GenericItem", &["GenericItem"])]
#[case("Nope", &[])]
fn test_chain_ancestry(#[case] start: &str, #[case] expected: &[&str]) {
    assert_eq!(ancestry(chain_schema(), start), expected);
}

#[test]
fn test_dangling_parent_ends_chain() {
    let declarations = vec![
        ItemDecl::new("Child").extends("Parent").into(),
        ItemDecl::new("Parent").extends("Missing").into(),
    ];
    assert_eq!(ancestry(declarations, "Child"), ["Child", "Parent"]);
}

#[test]
fn test_longer_cycle_through_root_terminates() {
    // The root itself is redeclared extending a user item.
    let declarations = vec![
        ItemDecl::new("GenericItem").extends("X").into(),
        ItemDecl::new("X").into(),
    ];
    assert_eq!(ancestry(declarations, "X"), ["X", "GenericItem"]);
}

#[test]
fn test_inherited_attribute_listing_shadows() {
    let model = model_from(chain_schema());
    let walker = InheritanceWalker::new(&model);
    let a = model.find_item_by_name("A").unwrap();

    let visible = walker.attributes(a, true);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].declaring_item.as_str(), "B");

    let every_x = walker.find_attributes_by_name(a, "x", true);
    let owners: Vec<_> = every_x.iter().map(|attr| attr.declaring_item.as_str()).collect();
    assert_eq!(owners, ["B", "C"]);
}

#[test]
fn test_relation_roles_are_inherited() {
    let model = model_from(core_schema());
    let walker = InheritanceWalker::new(&model);
    let order = model.find_item_by_name("Order").unwrap();

    assert!(walker.is_subtype_of(order, "AbstractOrder"));
    let roles = walker.find_reference_ends_by_role(order, "Entries", true);
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].relation.as_str(), "AbstractOrder2OrderEntry");
    assert!(walker.find_reference_ends_by_role(order, "entries", false).is_empty());
}
