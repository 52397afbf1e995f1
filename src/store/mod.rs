//! Declaration Store: merges partial declarations into one record per name.
//!
//! The store is single-writer. It is filled from a full declaration set and
//! then handed by shared reference to [`crate::meta::MetaModel::build`]; the
//! rebuild-and-publish discipline lives in [`crate::meta::MetaModelAccess`].
//!
//! ## Merge rules
//!
//! - Items: attributes and custom properties are unioned (last writer wins per
//!   name), flags are OR-ed, an index is overridden only by a `replace`
//!   declaration, and `extends` follows [`ExtendsMergePolicy`].
//! - Enums: values are unioned in first-seen order.
//! - Relations: the first declaration of a name wins.
//! - Collections: last writer wins.
//! - Atomics: the first declaration wins.
//! - Maps: a missing argument or return type is filled in by later
//!   declarations; a type already set is kept.

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::base::{EngineConfig, ExtendsMergePolicy, Name};
use crate::decl::{DeclKind, Declaration, DeclarationError};
use crate::model::{
    ConflictKind, MergeConflict, MetaAtomic, MetaCollection, MetaEnum, MetaItem, MetaMap,
    MetaRelation,
};

/// Raw merged records, keyed by name, in first-registration order.
#[derive(Debug, Clone, Default)]
pub struct DeclarationStore {
    extends_policy: ExtendsMergePolicy,
    items: IndexMap<Name, MetaItem>,
    enums: IndexMap<Name, MetaEnum>,
    relations: IndexMap<Name, MetaRelation>,
    collections: IndexMap<Name, MetaCollection>,
    atomics: IndexMap<Name, MetaAtomic>,
    maps: IndexMap<Name, MetaMap>,
    conflicts: Vec<MergeConflict>,
}

impl DeclarationStore {
    /// Create an empty store using the default merge policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store using the policy from `config`.
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            extends_policy: config.extends_policy,
            ..Self::default()
        }
    }

    /// Ingest one declaration, creating a record or merging into an existing one.
    pub fn register_or_merge(
        &mut self,
        declaration: impl Into<Declaration>,
    ) -> Result<(), DeclarationError> {
        let declaration = declaration.into();
        declaration.validate()?;

        let origin = declaration.origin();
        match declaration {
            Declaration::Item(decl) => match self.items.entry(decl.name.clone()) {
                Entry::Occupied(mut entry) => {
                    let name = entry.key().clone();
                    if let Some(conflict) = entry.get_mut().merge(decl, self.extends_policy) {
                        self.record_conflict(DeclKind::Item, name, conflict, origin);
                    }
                }
                Entry::Vacant(entry) => {
                    tracing::trace!("[STORE] New item '{}'", entry.key());
                    entry.insert(MetaItem::from_decl(decl));
                }
            },
            Declaration::Enum(decl) => match self.enums.entry(decl.name.clone()) {
                Entry::Occupied(mut entry) => entry.get_mut().merge(decl),
                Entry::Vacant(entry) => {
                    entry.insert(MetaEnum::from_decl(decl));
                }
            },
            Declaration::Relation(decl) => match self.relations.entry(decl.name.clone()) {
                Entry::Occupied(entry) => {
                    let name = entry.key().clone();
                    self.record_conflict(DeclKind::Relation, name, ConflictKind::RelationRedeclared, origin);
                }
                Entry::Vacant(entry) => {
                    entry.insert(MetaRelation::from_decl(decl));
                }
            },
            Declaration::Collection(decl) => {
                self.collections
                    .insert(decl.name.clone(), MetaCollection::from_decl(decl));
            }
            Declaration::Atomic(decl) => match self.atomics.entry(decl.class_name.clone()) {
                Entry::Occupied(entry) => {
                    if entry.get().extends != decl.extends {
                        let name = entry.key().clone();
                        self.record_conflict(DeclKind::Atomic, name, ConflictKind::AtomicRedeclared, origin);
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(MetaAtomic::from_decl(decl));
                }
            },
            Declaration::Map(decl) => match self.maps.entry(decl.name.clone()) {
                Entry::Occupied(mut entry) => {
                    let name = entry.key().clone();
                    if let Some(conflict) = entry.get_mut().merge(decl) {
                        self.record_conflict(DeclKind::Map, name, conflict, origin);
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(MetaMap::from_decl(decl));
                }
            },
        }
        Ok(())
    }

    /// Register many declarations, returning the ones that were rejected.
    ///
    /// Rejected declarations are skipped; the rest still merge.
    pub fn register_all<I>(&mut self, declarations: I) -> Vec<DeclarationError>
    where
        I: IntoIterator,
        I::Item: Into<Declaration>,
    {
        declarations
            .into_iter()
            .filter_map(|decl| self.register_or_merge(decl).err())
            .collect()
    }

    fn record_conflict(
        &mut self,
        kind: DeclKind,
        name: Name,
        conflict: ConflictKind,
        origin: Option<crate::base::Origin>,
    ) {
        let conflict = MergeConflict {
            kind,
            name,
            conflict,
            origin,
        };
        tracing::warn!("[STORE] Merge conflict: {}", conflict);
        self.conflicts.push(conflict);
    }

    // ============================================================
    // Snapshots (for index construction)
    // ============================================================

    pub fn all_items(&self) -> impl ExactSizeIterator<Item = &MetaItem> {
        self.items.values()
    }

    pub fn all_enums(&self) -> impl ExactSizeIterator<Item = &MetaEnum> {
        self.enums.values()
    }

    pub fn all_relations(&self) -> impl ExactSizeIterator<Item = &MetaRelation> {
        self.relations.values()
    }

    pub fn all_collections(&self) -> impl ExactSizeIterator<Item = &MetaCollection> {
        self.collections.values()
    }

    pub fn all_atomics(&self) -> impl ExactSizeIterator<Item = &MetaAtomic> {
        self.atomics.values()
    }

    pub fn all_maps(&self) -> impl ExactSizeIterator<Item = &MetaMap> {
        self.maps.values()
    }

    // ============================================================
    // Direct access
    // ============================================================

    pub fn item(&self, name: &str) -> Option<&MetaItem> {
        self.items.get(name)
    }

    pub fn enumeration(&self, name: &str) -> Option<&MetaEnum> {
        self.enums.get(name)
    }

    pub fn relation(&self, name: &str) -> Option<&MetaRelation> {
        self.relations.get(name)
    }

    pub fn map(&self, name: &str) -> Option<&MetaMap> {
        self.maps.get(name)
    }

    /// Conflicts recorded so far, in the order they were found.
    pub fn conflicts(&self) -> &[MergeConflict] {
        &self.conflicts
    }

    pub fn extends_policy(&self) -> ExtendsMergePolicy {
        self.extends_policy
    }

    /// Total number of records of all kinds.
    pub fn len(&self) -> usize {
        self.items.len()
            + self.enums.len()
            + self.relations.len()
            + self.collections.len()
            + self.atomics.len()
            + self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every record and conflict, keeping the merge policy.
    pub fn clear(&mut self) {
        self.items.clear();
        self.enums.clear();
        self.relations.clear();
        self.collections.clear();
        self.atomics.clear();
        self.maps.clear();
        self.conflicts.clear();
    }
}
