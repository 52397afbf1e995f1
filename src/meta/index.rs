//! The immutable lookup tables.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::{Generation, OwnerKind};
use crate::base::{EngineConfig, Name};
use crate::model::{
    Classifier, MetaAtomic, MetaCollection, MetaEnum, MetaItem, MetaMap, MetaRelation,
    MetaRelationEnd,
};
use crate::store::DeclarationStore;

/// Name-keyed tables built from one declaration-set generation.
///
/// Besides the plain tables the model keeps, per item name, the relation ends
/// that item gains as features by being the type of the opposite end of some
/// relation ("reference ends"). They are collected in relation registration
/// order.
#[derive(Debug, Clone)]
pub struct MetaModel {
    generation: Generation,
    root_item: Name,
    link_item: Name,
    items: FxHashMap<Name, Arc<MetaItem>>,
    enums: FxHashMap<Name, Arc<MetaEnum>>,
    relations: FxHashMap<Name, Arc<MetaRelation>>,
    collections: FxHashMap<Name, Arc<MetaCollection>>,
    atomics: FxHashMap<Name, Arc<MetaAtomic>>,
    maps: FxHashMap<Name, Arc<MetaMap>>,
    /// item name → ends whose opposite end is typed by that item
    reference_ends: FxHashMap<Name, Vec<Arc<MetaRelationEnd>>>,
}

impl MetaModel {
    /// A model with no declarations, not even the built-in items.
    pub fn empty(config: &EngineConfig) -> Self {
        Self {
            generation: Generation::INITIAL,
            root_item: config.root_item_name.clone(),
            link_item: config.link_item_name.clone(),
            items: FxHashMap::default(),
            enums: FxHashMap::default(),
            relations: FxHashMap::default(),
            collections: FxHashMap::default(),
            atomics: FxHashMap::default(),
            maps: FxHashMap::default(),
            reference_ends: FxHashMap::default(),
        }
    }

    /// Copy the store's snapshots into fresh tables.
    pub fn build(store: &DeclarationStore, config: &EngineConfig, generation: Generation) -> Self {
        let mut model = Self::empty(config);
        model.generation = generation;

        model.items.reserve(store.all_items().len());
        for item in store.all_items() {
            model.items.insert(item.name.clone(), Arc::new(item.clone()));
        }
        for enumeration in store.all_enums() {
            model
                .enums
                .insert(enumeration.name.clone(), Arc::new(enumeration.clone()));
        }
        for collection in store.all_collections() {
            model
                .collections
                .insert(collection.name.clone(), Arc::new(collection.clone()));
        }
        for atomic in store.all_atomics() {
            model
                .atomics
                .insert(atomic.class_name.clone(), Arc::new(atomic.clone()));
        }
        for map in store.all_maps() {
            model.maps.insert(map.name.clone(), Arc::new(map.clone()));
        }

        if config.synthesize_builtins {
            model.synthesize_builtins();
        }

        for relation in store.all_relations() {
            let relation = Arc::new(relation.clone());
            model.register_reference_ends(&relation);
            model.relations.insert(relation.name.clone(), relation);
        }

        tracing::debug!(
            "[INDEX] Built {}: {} items, {} enums, {} relations",
            generation,
            model.items.len(),
            model.enums.len(),
            model.relations.len()
        );
        model
    }

    fn synthesize_builtins(&mut self) {
        if !self.items.contains_key(&self.root_item) {
            tracing::debug!("[INDEX] Synthesizing root item '{}'", self.root_item);
            let root = MetaItem::synthetic(self.root_item.clone(), None);
            self.items.insert(self.root_item.clone(), Arc::new(root));
        }
        if !self.items.contains_key(&self.link_item) {
            tracing::debug!("[INDEX] Synthesizing link item '{}'", self.link_item);
            let link = MetaItem::synthetic(self.link_item.clone(), Some(self.root_item.clone()));
            self.items.insert(self.link_item.clone(), Arc::new(link));
        }
    }

    /// Make each navigable, well-formed end a feature of the item on the
    /// other side.
    fn register_reference_ends(&mut self, relation: &MetaRelation) {
        for (end, opposite) in relation.end_pairs() {
            if !end.navigable {
                continue;
            }
            if !end.is_well_formed() {
                tracing::warn!(
                    "[INDEX] Skipping malformed {} end of relation '{}'",
                    end.side.as_str(),
                    relation.name
                );
                continue;
            }
            let Some(owner) = opposite.type_name.clone() else {
                tracing::warn!(
                    "[INDEX] Relation '{}' has no {} type",
                    relation.name,
                    opposite.side.as_str()
                );
                continue;
            };
            self.reference_ends
                .entry(owner)
                .or_default()
                .push(Arc::clone(end));
        }
    }

    // ============================================================
    // Lookups
    // ============================================================

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn root_item_name(&self) -> &Name {
        &self.root_item
    }

    pub fn link_item_name(&self) -> &Name {
        &self.link_item
    }

    pub fn find_item_by_name(&self, name: &str) -> Option<&Arc<MetaItem>> {
        self.items.get(name)
    }

    pub fn find_enum_by_name(&self, name: &str) -> Option<&Arc<MetaEnum>> {
        self.enums.get(name)
    }

    pub fn find_relation_by_name(&self, name: &str) -> Option<&Arc<MetaRelation>> {
        self.relations.get(name)
    }

    pub fn find_collection_by_name(&self, name: &str) -> Option<&Arc<MetaCollection>> {
        self.collections.get(name)
    }

    pub fn find_atomic_by_name(&self, name: &str) -> Option<&Arc<MetaAtomic>> {
        self.atomics.get(name)
    }

    pub fn find_map_by_name(&self, name: &str) -> Option<&Arc<MetaMap>> {
        self.maps.get(name)
    }

    /// Anything a `type_ref` may name: item, collection, enum, atomic, then map.
    pub fn find_classifier_by_name(&self, name: &str) -> Option<Classifier> {
        if let Some(item) = self.items.get(name) {
            return Some(Classifier::Item(Arc::clone(item)));
        }
        if let Some(collection) = self.collections.get(name) {
            return Some(Classifier::Collection(Arc::clone(collection)));
        }
        if let Some(enumeration) = self.enums.get(name) {
            return Some(Classifier::Enum(Arc::clone(enumeration)));
        }
        if let Some(atomic) = self.atomics.get(name) {
            return Some(Classifier::Atomic(Arc::clone(atomic)));
        }
        self.maps
            .get(name)
            .map(|map| Classifier::Map(Arc::clone(map)))
    }

    /// Relation ends that `item` gains as features. Own level only.
    pub fn reference_ends_of(&self, item: &str) -> &[Arc<MetaRelationEnd>] {
        self.reference_ends
            .get(item)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Kind of the declaration named `name`: item, then relation, then enum.
    pub fn owner_kind_of(&self, name: &str) -> Option<OwnerKind> {
        if self.items.contains_key(name) {
            Some(OwnerKind::Item)
        } else if self.relations.contains_key(name) {
            Some(OwnerKind::Relation)
        } else if self.enums.contains_key(name) {
            Some(OwnerKind::Enum)
        } else {
            None
        }
    }

    pub fn items(&self) -> impl Iterator<Item = &Arc<MetaItem>> {
        self.items.values()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    pub fn map_count(&self) -> usize {
        self.maps.len()
    }
}
