//! Declaration records: the already-parsed input to the engine.
//!
//! A schema parser (outside this crate) turns every type declaration it sees
//! into one of these records. The same item may be declared many times, in
//! many files, each time contributing part of its attributes; merging happens
//! in [`crate::store`].
//!
//! The builder methods exist mostly for front ends and tests that assemble
//! declarations by hand.

mod error;

pub use error::DeclarationError;

use crate::base::{Name, Origin, is_blank};

// ============================================================================
// DECLARATION
// ============================================================================

/// The kind of a declaration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Item,
    Enum,
    Relation,
    Collection,
    Atomic,
    Map,
}

impl DeclKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclKind::Item => "item",
            DeclKind::Enum => "enum",
            DeclKind::Relation => "relation",
            DeclKind::Collection => "collection",
            DeclKind::Atomic => "atomic",
            DeclKind::Map => "map",
        }
    }
}

impl std::fmt::Display for DeclKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single (possibly partial) declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "interchange",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "lowercase")
)]
pub enum Declaration {
    Item(ItemDecl),
    Enum(EnumDecl),
    Relation(RelationDecl),
    Collection(CollectionDecl),
    Atomic(AtomicDecl),
    Map(MapDecl),
}

impl Declaration {
    /// The name this declaration registers under.
    pub fn name(&self) -> &Name {
        match self {
            Declaration::Item(d) => &d.name,
            Declaration::Enum(d) => &d.name,
            Declaration::Relation(d) => &d.name,
            Declaration::Collection(d) => &d.name,
            Declaration::Atomic(d) => &d.class_name,
            Declaration::Map(d) => &d.name,
        }
    }

    pub fn kind(&self) -> DeclKind {
        match self {
            Declaration::Item(_) => DeclKind::Item,
            Declaration::Enum(_) => DeclKind::Enum,
            Declaration::Relation(_) => DeclKind::Relation,
            Declaration::Collection(_) => DeclKind::Collection,
            Declaration::Atomic(_) => DeclKind::Atomic,
            Declaration::Map(_) => DeclKind::Map,
        }
    }

    pub fn origin(&self) -> Option<Origin> {
        match self {
            Declaration::Item(d) => d.origin,
            Declaration::Enum(d) => d.origin,
            Declaration::Relation(d) => d.origin,
            Declaration::Collection(d) => d.origin,
            Declaration::Atomic(d) => d.origin,
            Declaration::Map(d) => d.origin,
        }
    }

    /// Reject records the store cannot key.
    ///
    /// Only a blank record name is fatal for a declaration; blank attribute,
    /// property or value names are dropped during the merge instead.
    pub fn validate(&self) -> Result<(), DeclarationError> {
        if is_blank(self.name()) {
            return Err(DeclarationError::BlankName {
                kind: self.kind(),
                origin: self.origin(),
            });
        }
        Ok(())
    }
}

impl From<ItemDecl> for Declaration {
    fn from(decl: ItemDecl) -> Self {
        Declaration::Item(decl)
    }
}

impl From<EnumDecl> for Declaration {
    fn from(decl: EnumDecl) -> Self {
        Declaration::Enum(decl)
    }
}

impl From<RelationDecl> for Declaration {
    fn from(decl: RelationDecl) -> Self {
        Declaration::Relation(decl)
    }
}

impl From<CollectionDecl> for Declaration {
    fn from(decl: CollectionDecl) -> Self {
        Declaration::Collection(decl)
    }
}

impl From<AtomicDecl> for Declaration {
    fn from(decl: AtomicDecl) -> Self {
        Declaration::Atomic(decl)
    }
}

impl From<MapDecl> for Declaration {
    fn from(decl: MapDecl) -> Self {
        Declaration::Map(decl)
    }
}

// ============================================================================
// ITEMS
// ============================================================================

/// Boolean modifiers of an item type. Merged by OR across declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "interchange",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ItemFlags {
    pub is_abstract: bool,
    pub autocreate: bool,
    pub generate: bool,
    pub singleton: bool,
    pub jalo_only: bool,
}

impl ItemFlags {
    /// Union the flags of another declaration into these.
    pub fn merge(&mut self, other: ItemFlags) {
        self.is_abstract |= other.is_abstract;
        self.autocreate |= other.autocreate;
        self.generate |= other.generate;
        self.singleton |= other.singleton;
        self.jalo_only |= other.jalo_only;
    }
}

/// One declaration of an item type.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "interchange",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ItemDecl {
    pub name: Name,
    pub extends: Option<Name>,
    pub attributes: Vec<AttributeDecl>,
    pub custom_properties: Vec<CustomProperty>,
    pub indexes: Vec<IndexDecl>,
    pub flags: ItemFlags,
    pub origin: Option<Origin>,
}

impl ItemDecl {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn extends(mut self, parent: impl Into<Name>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    pub fn attribute(mut self, attribute: AttributeDecl) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Shorthand for an attribute with only a name and a type.
    pub fn attr(self, name: impl Into<Name>, type_ref: impl Into<Name>) -> Self {
        self.attribute(AttributeDecl::new(name).typed(type_ref))
    }

    pub fn custom_property(mut self, name: impl Into<Name>, value: impl Into<String>) -> Self {
        self.custom_properties.push(CustomProperty::new(name, value));
        self
    }

    pub fn index(mut self, index: IndexDecl) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn abstract_(mut self) -> Self {
        self.flags.is_abstract = true;
        self
    }

    pub fn with_flags(mut self, flags: ItemFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn at(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }
}

/// Persistence and access modifiers of an attribute.
///
/// Carried through to candidates untouched; the resolver does not look at them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "interchange",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AttributeModifiers {
    pub read: bool,
    pub write: bool,
    pub optional: bool,
    pub unique: bool,
    pub initial: bool,
    pub part_of: bool,
    pub search: bool,
    pub encrypted: bool,
    pub persistent: bool,
}

impl Default for AttributeModifiers {
    fn default() -> Self {
        Self {
            read: true,
            write: true,
            optional: true,
            unique: false,
            initial: false,
            part_of: false,
            search: true,
            encrypted: false,
            persistent: true,
        }
    }
}

impl AttributeModifiers {
    pub fn is_read_only(&self) -> bool {
        self.read && !self.write
    }
}

/// One attribute inside an item declaration.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "interchange",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AttributeDecl {
    pub name: Name,
    /// Name of an item, enum, collection, atomic or primitive type.
    pub type_ref: Option<Name>,
    pub modifiers: AttributeModifiers,
    pub redeclare: bool,
    pub custom_properties: Vec<CustomProperty>,
    pub origin: Option<Origin>,
}

impl AttributeDecl {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn typed(mut self, type_ref: impl Into<Name>) -> Self {
        self.type_ref = Some(type_ref.into());
        self
    }

    pub fn modifiers(mut self, modifiers: AttributeModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn redeclare(mut self) -> Self {
        self.redeclare = true;
        self
    }

    pub fn custom_property(mut self, name: impl Into<Name>, value: impl Into<String>) -> Self {
        self.custom_properties.push(CustomProperty::new(name, value));
        self
    }

    pub fn at(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }
}

/// A free-form `name = value` property on an item or attribute.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "interchange",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CustomProperty {
    pub name: Name,
    pub value: String,
}

impl CustomProperty {
    pub fn new(name: impl Into<Name>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A database index declared on an item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "interchange",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct IndexDecl {
    pub name: Name,
    pub keys: Vec<Name>,
    pub unique: bool,
    /// A replacing declaration overrides an index declared earlier.
    pub replace: bool,
    pub remove: bool,
    pub origin: Option<Origin>,
}

impl IndexDecl {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn key(mut self, attribute: impl Into<Name>) -> Self {
        self.keys.push(attribute.into());
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn replacing(mut self) -> Self {
        self.replace = true;
        self
    }
}

// ============================================================================
// ENUMS
// ============================================================================

/// One declaration of an enumeration.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "interchange",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EnumDecl {
    pub name: Name,
    pub values: Vec<EnumValueDecl>,
    pub dynamic: bool,
    pub origin: Option<Origin>,
}

impl EnumDecl {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn value(mut self, code: impl Into<Name>) -> Self {
        self.values.push(EnumValueDecl {
            code: code.into(),
            origin: None,
        });
        self
    }

    pub fn dynamic(mut self) -> Self {
        self.dynamic = true;
        self
    }

    pub fn at(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "interchange",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EnumValueDecl {
    pub code: Name,
    pub origin: Option<Origin>,
}

// ============================================================================
// RELATIONS
// ============================================================================

/// How many items one end of a relation holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "interchange",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Cardinality {
    One,
    #[default]
    Many,
}

/// Container shape of a `Many` relation end or of a collection type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "interchange",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum CollectionKind {
    #[default]
    Collection,
    List,
    Set,
}

/// One side of a relation declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "interchange",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RelationEndDecl {
    /// Role name used as the feature name in queries.
    pub qualifier: Option<Name>,
    /// The item this end points at.
    pub type_name: Option<Name>,
    pub cardinality: Cardinality,
    pub collection_kind: CollectionKind,
    pub navigable: bool,
    pub ordered: bool,
    pub origin: Option<Origin>,
}

impl Default for RelationEndDecl {
    fn default() -> Self {
        Self {
            qualifier: None,
            type_name: None,
            cardinality: Cardinality::default(),
            collection_kind: CollectionKind::default(),
            navigable: true,
            ordered: false,
            origin: None,
        }
    }
}

impl RelationEndDecl {
    pub fn new(qualifier: impl Into<Name>, type_name: impl Into<Name>) -> Self {
        Self {
            qualifier: Some(qualifier.into()),
            type_name: Some(type_name.into()),
            ..Default::default()
        }
    }

    pub fn one(mut self) -> Self {
        self.cardinality = Cardinality::One;
        self
    }

    pub fn many(mut self, kind: CollectionKind) -> Self {
        self.cardinality = Cardinality::Many;
        self.collection_kind = kind;
        self
    }

    pub fn not_navigable(mut self) -> Self {
        self.navigable = false;
        self
    }

    pub fn ordered(mut self) -> Self {
        self.ordered = true;
        self
    }

    pub fn at(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }
}

/// One declaration of a relation between two items.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "interchange",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RelationDecl {
    pub name: Name,
    pub source: RelationEndDecl,
    pub target: RelationEndDecl,
    pub localized: bool,
    pub origin: Option<Origin>,
}

impl RelationDecl {
    pub fn new(name: impl Into<Name>, source: RelationEndDecl, target: RelationEndDecl) -> Self {
        Self {
            name: name.into(),
            source,
            target,
            localized: false,
            origin: None,
        }
    }

    pub fn at(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }
}

// ============================================================================
// COLLECTIONS, ATOMICS AND MAPS
// ============================================================================

/// A named collection type (`ProductCollection` of `Product`).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "interchange",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CollectionDecl {
    pub name: Name,
    pub element_type: Option<Name>,
    pub kind: CollectionKind,
    pub origin: Option<Origin>,
}

impl CollectionDecl {
    pub fn new(name: impl Into<Name>, element_type: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            element_type: Some(element_type.into()),
            ..Default::default()
        }
    }

    pub fn kind(mut self, kind: CollectionKind) -> Self {
        self.kind = kind;
        self
    }
}

/// A primitive value type, keyed by its implementation class name.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "interchange",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AtomicDecl {
    pub class_name: Name,
    pub extends: Option<Name>,
    pub origin: Option<Origin>,
}

impl AtomicDecl {
    pub fn new(class_name: impl Into<Name>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Default::default()
        }
    }
}

/// A named map type (`localized:java.lang.String` from `Language` to `String`).
///
/// Either type may be left out; a later declaration of the same name can
/// supply it.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "interchange",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MapDecl {
    pub name: Name,
    pub argument_type: Option<Name>,
    pub return_type: Option<Name>,
    pub origin: Option<Origin>,
}

impl MapDecl {
    pub fn new(
        name: impl Into<Name>,
        argument_type: impl Into<Name>,
        return_type: impl Into<Name>,
    ) -> Self {
        Self {
            name: name.into(),
            argument_type: Some(argument_type.into()),
            return_type: Some(return_type.into()),
            origin: None,
        }
    }

    pub fn at(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }
}
