//! Readable summaries of resolution results.

use typesys::{Resolution, ResolutionCandidate};

/// `Item.attribute`, `Relation:side` or `enum Name` per candidate, in order.
pub fn describe(resolution: &Resolution) -> Vec<String> {
    resolution.iter().map(describe_candidate).collect()
}

pub fn describe_candidate(candidate: &ResolutionCandidate) -> String {
    match candidate {
        ResolutionCandidate::Attribute(attr) => format!("{}.{}", attr.declaring_item, attr.name),
        ResolutionCandidate::RelationEnd(end) => format!("{}:{}", end.relation, end.side.as_str()),
        ResolutionCandidate::Enum(meta) => format!("enum {}", meta.name),
    }
}

pub fn assert_resolves_to(resolution: &Resolution, expected: &[&str]) {
    let actual = describe(resolution);
    assert_eq!(actual, expected, "Unexpected candidates: {:?}", actual);
}
