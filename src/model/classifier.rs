use std::sync::Arc;

use super::{ConflictKind, MetaEnum, MetaItem};
use crate::base::{Name, Origin};
use crate::decl::{AtomicDecl, CollectionDecl, CollectionKind, MapDecl};

/// A named collection of some element type.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaCollection {
    pub name: Name,
    pub element_type: Option<Name>,
    pub kind: CollectionKind,
    pub origin: Option<Origin>,
}

impl MetaCollection {
    pub fn from_decl(decl: CollectionDecl) -> Self {
        Self {
            name: decl.name,
            element_type: decl.element_type,
            kind: decl.kind,
            origin: decl.origin,
        }
    }
}

/// A primitive value type.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaAtomic {
    pub class_name: Name,
    pub extends: Option<Name>,
    pub origin: Option<Origin>,
}

impl MetaAtomic {
    pub fn from_decl(decl: AtomicDecl) -> Self {
        Self {
            class_name: decl.class_name,
            extends: decl.extends,
            origin: decl.origin,
        }
    }
}

/// A map type merged from all of its declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaMap {
    pub name: Name,
    pub argument_type: Option<Name>,
    pub return_type: Option<Name>,
    pub origin: Option<Origin>,
}

impl MetaMap {
    pub fn from_decl(decl: MapDecl) -> Self {
        Self {
            name: decl.name,
            argument_type: decl.argument_type,
            return_type: decl.return_type,
            origin: decl.origin,
        }
    }

    /// Fill in types this record lacks. A type already set is kept; a
    /// different one from `decl` is reported as a conflict.
    pub fn merge(&mut self, decl: MapDecl) -> Option<ConflictKind> {
        let argument = fill(&mut self.argument_type, decl.argument_type);
        let ret = fill(&mut self.return_type, decl.return_type);
        if self.origin.is_none() {
            self.origin = decl.origin;
        }
        (argument || ret).then_some(ConflictKind::MapRedeclared)
    }
}

/// Returns true when `incoming` disagrees with an existing value.
fn fill(slot: &mut Option<Name>, incoming: Option<Name>) -> bool {
    match (slot.as_ref(), incoming) {
        (None, incoming) => {
            *slot = incoming;
            false
        }
        (Some(kept), Some(incoming)) => *kept != incoming,
        (Some(_), None) => false,
    }
}

/// Anything an attribute's `type_ref` can name.
#[derive(Debug, Clone, PartialEq)]
pub enum Classifier {
    Item(Arc<MetaItem>),
    Collection(Arc<MetaCollection>),
    Enum(Arc<MetaEnum>),
    Atomic(Arc<MetaAtomic>),
    Map(Arc<MetaMap>),
}

impl Classifier {
    pub fn name(&self) -> &Name {
        match self {
            Classifier::Item(m) => &m.name,
            Classifier::Collection(m) => &m.name,
            Classifier::Enum(m) => &m.name,
            Classifier::Atomic(m) => &m.class_name,
            Classifier::Map(m) => &m.name,
        }
    }

    pub fn origin(&self) -> Option<Origin> {
        match self {
            Classifier::Item(m) => m.origin(),
            Classifier::Collection(m) => m.origin,
            Classifier::Enum(m) => m.origin(),
            Classifier::Atomic(m) => m.origin,
            Classifier::Map(m) => m.origin,
        }
    }
}
