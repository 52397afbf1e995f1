use std::ops::Deref;
use std::sync::Arc;

use crate::base::{Name, Origin};
use crate::model::{MetaAttribute, MetaEnum, MetaRelationEnd};

/// One declaration a feature name may refer to.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionCandidate {
    /// An attribute declared on the item or one of its ancestors.
    Attribute(Arc<MetaAttribute>),
    /// A relation end: either a relation-derived role of an item, or the
    /// `source`/`target` end of a relation owner.
    RelationEnd(Arc<MetaRelationEnd>),
    /// The enumeration itself, for its `code` and `name` features.
    Enum(Arc<MetaEnum>),
}

impl ResolutionCandidate {
    /// Name of the feature this candidate declares.
    pub fn name(&self) -> Option<&Name> {
        match self {
            ResolutionCandidate::Attribute(attr) => Some(&attr.name),
            ResolutionCandidate::RelationEnd(end) => end.qualifier.as_ref(),
            ResolutionCandidate::Enum(meta) => Some(&meta.name),
        }
    }

    /// Where to navigate for "go to declaration".
    pub fn origin(&self) -> Option<Origin> {
        match self {
            ResolutionCandidate::Attribute(attr) => attr.origin,
            ResolutionCandidate::RelationEnd(end) => end.origin,
            ResolutionCandidate::Enum(meta) => meta.origin(),
        }
    }

    /// Type the feature evaluates to: attribute type, the item an end
    /// points at, or the enum.
    pub fn type_name(&self) -> Option<&Name> {
        match self {
            ResolutionCandidate::Attribute(attr) => attr.type_ref.as_ref(),
            ResolutionCandidate::RelationEnd(end) => end.type_name.as_ref(),
            ResolutionCandidate::Enum(meta) => Some(&meta.name),
        }
    }
}

/// An ordered, immutable sequence of candidates.
///
/// Cheap to clone; a cache hit hands out the same allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution(Arc<[ResolutionCandidate]>);

impl Resolution {
    pub fn empty() -> Self {
        Self(Arc::from(Vec::new()))
    }

    pub fn single(&self) -> Option<&ResolutionCandidate> {
        match &*self.0 {
            [only] => Some(only),
            _ => None,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        self.0.len() > 1
    }

    /// Whether both values share one allocation, i.e. one came from the cache.
    pub fn same_allocation(&self, other: &Resolution) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for Resolution {
    type Target = [ResolutionCandidate];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<ResolutionCandidate>> for Resolution {
    fn from(candidates: Vec<ResolutionCandidate>) -> Self {
        Self(Arc::from(candidates))
    }
}

impl FromIterator<ResolutionCandidate> for Resolution {
    fn from_iter<I: IntoIterator<Item = ResolutionCandidate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Resolution {
    type Item = &'a ResolutionCandidate;
    type IntoIter = std::slice::Iter<'a, ResolutionCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
