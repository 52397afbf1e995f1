//! Merged metamodel records.
//!
//! Each record here is the union of every declaration registered under one
//! name. The [`crate::store::DeclarationStore`] builds them; the
//! [`crate::meta::MetaModel`] publishes them behind `Arc`s.
//!
//! ## Key Types
//!
//! - [`MetaItem`] / [`MetaAttribute`] - item types and their attributes
//! - [`MetaEnum`] - enumerations
//! - [`MetaRelation`] / [`MetaRelationEnd`] - relations and their two ends
//! - [`MetaCollection`], [`MetaAtomic`], [`MetaMap`] - collection, primitive and map types
//! - [`MergeConflict`] - disagreements found while merging

mod classifier;
mod conflict;
mod enumeration;
mod item;
mod relation;

pub use classifier::{Classifier, MetaAtomic, MetaCollection, MetaMap};
pub use conflict::{ConflictKind, MergeConflict};
pub use enumeration::MetaEnum;
pub use item::{MetaAttribute, MetaItem, MetaItemIndex};
pub use relation::{EndSide, MetaRelation, MetaRelationEnd};
