//! Loading declaration sets from JSON into a host.

use tokio_util::sync::CancellationToken;
use typesys::interchange::{InterchangeError, load_declarations_json, to_json};
use typesys::{AnalysisHost, FeatureRequest};

use crate::helpers::fixtures::*;
use crate::helpers::resolution_assertions::*;

#[test]
fn test_json_schema_resolves_like_built_one() {
    let json = to_json(&core_schema()).unwrap();
    let declarations = load_declarations_json(&json).unwrap();

    let mut host = AnalysisHost::default();
    assert!(host.set_file_declarations(CORE_FILE, declarations).is_empty());
    let analysis = host.analysis();
    let resolution = analysis.resolve(
        &FeatureRequest::relation("OrderEntry2Product", "qty"),
        &CancellationToken::new(),
    );
    assert_resolves_to(&resolution, &["Link.qty"]);
}

#[test]
fn test_hand_written_json() {
    let json = r#"[
        {"kind": "item", "name": "Unit", "attributes": [{"name": "code", "type_ref": "java.lang.String"}]},
        {"kind": "item", "name": "Unit", "extends": "GenericItem", "flags": {"singleton": true}},
        {"kind": "enum", "name": "UnitType", "values": [{"code": "WEIGHT"}]}
    ]"#;
    let mut host = AnalysisHost::default();
    host.set_file_declarations(CORE_FILE, load_declarations_json(json).unwrap());
    let analysis = host.analysis();

    let unit = analysis.model().find_item_by_name("Unit").unwrap();
    assert!(unit.flags.singleton);
    assert!(unit.attribute("code").is_some());
}

#[test]
fn test_map_declarations_load_from_json() {
    let json = r#"[
        {"kind": "map", "name": "localized:java.lang.String", "argument_type": "Language"},
        {"kind": "map", "name": "localized:java.lang.String", "return_type": "java.lang.String"}
    ]"#;
    let declarations = load_declarations_json(json).unwrap();
    assert_eq!(declarations.len(), 2);

    let mut host = AnalysisHost::default();
    assert!(host.set_file_declarations(CORE_FILE, declarations).is_empty());
    let analysis = host.analysis();

    let map = analysis
        .model()
        .find_map_by_name("localized:java.lang.String")
        .unwrap();
    assert_eq!(map.argument_type.as_deref(), Some("Language"));
    assert_eq!(map.return_type.as_deref(), Some("java.lang.String"));
    assert!(host.conflicts().is_empty());
}

#[test]
fn test_invalid_json_is_an_error() {
    assert!(matches!(load_declarations_json("not json"), Err(InterchangeError::Json(_))));
}
