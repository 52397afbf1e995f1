//! MetaModel Index: name-keyed lookup tables over the merged declarations.
//!
//! A [`MetaModel`] is built once per declaration-set generation from a
//! [`DeclarationStore`](crate::store::DeclarationStore) and never mutated
//! afterwards. [`MetaModelAccess`] holds the currently published model and
//! swaps in a new one atomically on rebuild.
//!
//! ## Key Types
//!
//! - [`MetaModel`] - immutable lookup tables plus relation-derived roles
//! - [`MetaModelAccess`] - rebuild-and-swap handle shared by readers
//! - [`Generation`] - monotonically increasing build stamp
//! - [`OwnerKind`] - the three kinds of owner a feature can be resolved on

mod access;
mod index;

pub use access::MetaModelAccess;
pub use index::MetaModel;

use std::fmt;

/// Build stamp of a published [`MetaModel`].
///
/// Every rebuild gets a strictly larger generation; cached resolutions record
/// the generation they were computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(pub u64);

impl Generation {
    pub const INITIAL: Generation = Generation(0);

    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen#{}", self.0)
    }
}

/// What kind of declaration owns the feature being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerKind {
    Item,
    Relation,
    Enum,
}

impl OwnerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerKind::Item => "item",
            OwnerKind::Relation => "relation",
            OwnerKind::Enum => "enum",
        }
    }
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
