use std::fmt;

use crate::base::{Name, Origin};
use crate::decl::DeclKind;

/// What two declarations of the same name disagreed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    /// Both declarations named a parent and the parents differ.
    ExtendsRedeclared { kept: Name, ignored: Name },
    /// A relation was declared again; the first declaration is kept.
    RelationRedeclared,
    /// An atomic type was declared again with a different parent.
    AtomicRedeclared,
    /// A map type was declared again with a different argument or return type.
    MapRedeclared,
}

/// A disagreement found while merging partial declarations.
///
/// Conflicts never stop a merge; they are kept for the front end to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConflict {
    pub kind: DeclKind,
    pub name: Name,
    pub conflict: ConflictKind,
    /// Origin of the declaration that lost.
    pub origin: Option<Origin>,
}

impl fmt::Display for MergeConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.conflict {
            ConflictKind::ExtendsRedeclared { kept, ignored } => write!(
                f,
                "{} '{}' extends '{}' but is redeclared extending '{}'",
                self.kind, self.name, kept, ignored
            ),
            ConflictKind::RelationRedeclared => {
                write!(f, "relation '{}' is declared more than once", self.name)
            }
            ConflictKind::AtomicRedeclared => write!(
                f,
                "atomic type '{}' is redeclared with a different parent",
                self.name
            ),
            ConflictKind::MapRedeclared => write!(
                f,
                "map type '{}' is redeclared with different key or value types",
                self.name
            ),
        }
    }
}
