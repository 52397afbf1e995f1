//! Inheritance Walker: cycle-safe traversal of an item's `extends` chain.
//!
//! The walk starts at the item itself and climbs through each explicit
//! parent, falling back to the implicit root for items without one. It stops
//! at the first name that was already visited (a cycle) or that does not name
//! a known item (a dangling parent). Neither is an error; the chain simply
//! ends there.

use std::iter::FusedIterator;
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use crate::base::Name;
use crate::meta::MetaModel;
use crate::model::{MetaAttribute, MetaItem, MetaItemIndex, MetaRelationEnd};

/// Iterator over an item and its ancestors, nearest first.
///
/// Owns its visited set, so every name is yielded at most once.
#[derive(Debug, Clone)]
pub struct Ancestry<'a> {
    model: &'a MetaModel,
    next: Option<&'a Arc<MetaItem>>,
    visited: FxHashSet<Name>,
}

impl<'a> Ancestry<'a> {
    fn new(model: &'a MetaModel, start: &'a Arc<MetaItem>) -> Self {
        let mut visited = FxHashSet::default();
        visited.insert(start.name.clone());
        Self {
            model,
            next: Some(start),
            visited,
        }
    }
}

impl<'a> Iterator for Ancestry<'a> {
    type Item = &'a Arc<MetaItem>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let parent = current
            .parent_name(self.model.root_item_name())
            .and_then(|parent| {
                if self.visited.contains(parent) {
                    tracing::trace!("[WALK] Cycle at '{}' -> '{}'", current.name, parent);
                    return None;
                }
                let found = self.model.find_item_by_name(parent);
                if found.is_none() {
                    tracing::trace!("[WALK] Dangling parent '{}' of '{}'", parent, current.name);
                }
                found
            });
        if let Some(parent) = parent {
            self.visited.insert(parent.name.clone());
            self.next = Some(parent);
        }
        Some(current)
    }
}

impl FusedIterator for Ancestry<'_> {}

/// Inheritance-aware queries over one [`MetaModel`].
#[derive(Debug, Clone, Copy)]
pub struct InheritanceWalker<'a> {
    model: &'a MetaModel,
}

impl<'a> InheritanceWalker<'a> {
    pub fn new(model: &'a MetaModel) -> Self {
        Self { model }
    }

    /// `item` itself, then each ancestor.
    pub fn ancestry(&self, item: &'a Arc<MetaItem>) -> Ancestry<'a> {
        Ancestry::new(self.model, item)
    }

    /// Like [`ancestry`](Self::ancestry), starting from a name. Empty when the
    /// name is not a known item.
    pub fn ancestry_of(&self, name: &str) -> impl Iterator<Item = &'a Arc<MetaItem>> + use<'a> {
        self.model
            .find_item_by_name(name)
            .map(|item| Ancestry::new(self.model, item))
            .into_iter()
            .flatten()
    }

    /// Call `visitor` on `item` and then on each ancestor.
    pub fn walk_ancestry(&self, item: &'a Arc<MetaItem>, mut visitor: impl FnMut(&'a Arc<MetaItem>)) {
        for ancestor in self.ancestry(item) {
            visitor(ancestor);
        }
    }

    /// Ancestors of `item`, without the item itself.
    pub fn ancestors(&self, item: &'a Arc<MetaItem>) -> impl Iterator<Item = &'a Arc<MetaItem>> + use<'a> {
        self.ancestry(item).skip(1)
    }

    /// Whether `ancestor` is `item` or appears in its chain.
    pub fn is_subtype_of(&self, item: &'a Arc<MetaItem>, ancestor: &str) -> bool {
        self.ancestry(item).any(|i| i.name == ancestor)
    }

    fn levels(
        &self,
        item: &'a Arc<MetaItem>,
        include_inherited: bool,
    ) -> impl Iterator<Item = &'a Arc<MetaItem>> + use<'a> {
        self.ancestry(item).take(if include_inherited { usize::MAX } else { 1 })
    }

    /// Visible attributes, one per name; nearer declarations shadow farther ones.
    pub fn attributes(&self, item: &'a Arc<MetaItem>, include_inherited: bool) -> Vec<Arc<MetaAttribute>> {
        let mut visible: IndexMap<&Name, &Arc<MetaAttribute>> = IndexMap::new();
        for level in self.levels(item, include_inherited) {
            for (name, attr) in &level.attributes {
                visible.entry(name).or_insert(attr);
            }
        }
        visible.into_values().cloned().collect()
    }

    /// Every attribute named `name` along the chain, nearest first.
    pub fn find_attributes_by_name(
        &self,
        item: &'a Arc<MetaItem>,
        name: &str,
        include_inherited: bool,
    ) -> Vec<Arc<MetaAttribute>> {
        self.levels(item, include_inherited)
            .filter_map(|level| level.attribute(name).cloned())
            .collect()
    }

    /// Custom properties; nearer values shadow farther ones.
    pub fn custom_properties(&self, item: &'a Arc<MetaItem>, include_inherited: bool) -> IndexMap<Name, String> {
        let mut merged = IndexMap::new();
        for level in self.levels(item, include_inherited) {
            for (key, value) in &level.custom_properties {
                merged.entry(key.clone()).or_insert_with(|| value.clone());
            }
        }
        merged
    }

    /// Indexes; a nearer index of the same name shadows a farther one.
    pub fn indexes(&self, item: &'a Arc<MetaItem>, include_inherited: bool) -> Vec<&'a MetaItemIndex> {
        let mut visible: IndexMap<&Name, &MetaItemIndex> = IndexMap::new();
        for level in self.levels(item, include_inherited) {
            for (name, index) in &level.indexes {
                visible.entry(name).or_insert(index);
            }
        }
        visible.into_values().filter(|index| !index.remove).collect()
    }

    /// Relation ends the item gains as features, level by level.
    pub fn reference_ends(&self, item: &'a Arc<MetaItem>, include_inherited: bool) -> Vec<Arc<MetaRelationEnd>> {
        self.levels(item, include_inherited)
            .flat_map(|level| self.model.reference_ends_of(&level.name).iter().cloned())
            .collect()
    }

    /// Reference ends whose qualifier matches `role`, ignoring case.
    pub fn find_reference_ends_by_role(
        &self,
        item: &'a Arc<MetaItem>,
        role: &str,
        include_inherited: bool,
    ) -> Vec<Arc<MetaRelationEnd>> {
        self.levels(item, include_inherited)
            .flat_map(|level| self.model.reference_ends_of(&level.name).iter())
            .filter(|end| end.qualifier_matches(role))
            .cloned()
            .collect()
    }
}
