//! Relations and their ends.

use std::sync::Arc;

use crate::base::{Name, Origin, eq_ignore_case, is_blank};
use crate::decl::{Cardinality, CollectionKind, RelationDecl, RelationEndDecl};

/// Which side of a relation an end sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndSide {
    Source,
    Target,
}

impl EndSide {
    pub fn opposite(self) -> Self {
        match self {
            EndSide::Source => EndSide::Target,
            EndSide::Target => EndSide::Source,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EndSide::Source => "source",
            EndSide::Target => "target",
        }
    }
}

/// One end of a relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaRelationEnd {
    /// Name of the owning relation.
    pub relation: Name,
    pub side: EndSide,
    pub qualifier: Option<Name>,
    /// The item this end points at.
    pub type_name: Option<Name>,
    pub cardinality: Cardinality,
    pub collection_kind: CollectionKind,
    pub navigable: bool,
    pub ordered: bool,
    pub origin: Option<Origin>,
}

impl MetaRelationEnd {
    fn from_decl(relation: &Name, side: EndSide, decl: RelationEndDecl) -> Self {
        Self {
            relation: relation.clone(),
            side,
            qualifier: decl.qualifier.filter(|q| !is_blank(q)),
            type_name: decl.type_name.filter(|t| !is_blank(t)),
            cardinality: decl.cardinality,
            collection_kind: decl.collection_kind,
            navigable: decl.navigable,
            ordered: decl.ordered,
            origin: decl.origin,
        }
    }

    /// Role qualifier comparison, case-insensitive.
    pub fn qualifier_matches(&self, feature: &str) -> bool {
        self.qualifier
            .as_deref()
            .is_some_and(|q| eq_ignore_case(q, feature))
    }

    /// An end is usable for role matching only with both a type and a qualifier.
    pub fn is_well_formed(&self) -> bool {
        self.type_name.is_some() && self.qualifier.is_some()
    }
}

/// A relation between two items.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaRelation {
    pub name: Name,
    pub source: Arc<MetaRelationEnd>,
    pub target: Arc<MetaRelationEnd>,
    pub localized: bool,
    pub origin: Option<Origin>,
}

impl MetaRelation {
    pub fn from_decl(decl: RelationDecl) -> Self {
        let name = decl.name;
        Self {
            source: Arc::new(MetaRelationEnd::from_decl(&name, EndSide::Source, decl.source)),
            target: Arc::new(MetaRelationEnd::from_decl(&name, EndSide::Target, decl.target)),
            localized: decl.localized,
            origin: decl.origin,
            name,
        }
    }

    pub fn end(&self, side: EndSide) -> &Arc<MetaRelationEnd> {
        match side {
            EndSide::Source => &self.source,
            EndSide::Target => &self.target,
        }
    }

    /// The two ends as `(end, opposite end)` pairs.
    pub fn end_pairs(&self) -> [(&Arc<MetaRelationEnd>, &Arc<MetaRelationEnd>); 2] {
        [(&self.source, &self.target), (&self.target, &self.source)]
    }
}
