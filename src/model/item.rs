//! Item types and their attributes.

use std::sync::Arc;

use indexmap::IndexMap;

use super::ConflictKind;
use crate::base::{ExtendsMergePolicy, Name, Origin, is_blank};
use crate::decl::{AttributeDecl, AttributeModifiers, CustomProperty, IndexDecl, ItemDecl, ItemFlags};

// ============================================================================
// ATTRIBUTE
// ============================================================================

/// An attribute of an item, as last declared.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaAttribute {
    pub name: Name,
    /// Item that declared the attribute. A name, not an owning pointer.
    pub declaring_item: Name,
    pub type_ref: Option<Name>,
    pub modifiers: AttributeModifiers,
    pub redeclare: bool,
    pub custom_properties: IndexMap<Name, String>,
    pub origin: Option<Origin>,
}

impl MetaAttribute {
    /// Build from a declaration; `None` when the attribute name is blank.
    pub fn from_decl(declaring_item: &Name, decl: AttributeDecl) -> Option<Self> {
        let name = trimmed(decl.name)?;
        Some(Self {
            name,
            declaring_item: declaring_item.clone(),
            type_ref: decl.type_ref.filter(|t| !is_blank(t)),
            modifiers: decl.modifiers,
            redeclare: decl.redeclare,
            custom_properties: collect_properties(decl.custom_properties),
            origin: decl.origin,
        })
    }
}

// ============================================================================
// INDEX
// ============================================================================

/// A database index declared on an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaItemIndex {
    pub name: Name,
    pub keys: Vec<Name>,
    pub unique: bool,
    pub replace: bool,
    pub remove: bool,
    pub origin: Option<Origin>,
}

impl MetaItemIndex {
    fn from_decl(decl: IndexDecl) -> Option<Self> {
        let name = trimmed(decl.name)?;
        Some(Self {
            name,
            keys: decl.keys,
            unique: decl.unique,
            replace: decl.replace,
            remove: decl.remove,
            origin: decl.origin,
        })
    }
}

// ============================================================================
// ITEM
// ============================================================================

/// An item type merged from all of its declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaItem {
    pub name: Name,
    /// Explicit parent. `None` means the implicit root.
    pub extends: Option<Name>,
    /// Own attributes in first-declaration order.
    pub attributes: IndexMap<Name, Arc<MetaAttribute>>,
    pub custom_properties: IndexMap<Name, String>,
    pub indexes: IndexMap<Name, MetaItemIndex>,
    pub flags: ItemFlags,
    /// Every declaration that contributed to this record.
    pub declarations: Vec<Origin>,
    /// Added by the engine because the declaration set lacked it.
    pub synthetic: bool,
}

impl MetaItem {
    /// Create a record from the first declaration of a name.
    pub fn from_decl(decl: ItemDecl) -> Self {
        let mut item = Self::empty(decl.name.clone());
        item.extends = decl.extends.clone().filter(|p| !is_blank(p));
        item.absorb(decl);
        item
    }

    /// An engine-made item with no attributes.
    pub fn synthetic(name: impl Into<Name>, extends: Option<Name>) -> Self {
        let mut item = Self::empty(name.into());
        item.extends = extends;
        item.synthetic = true;
        item
    }

    fn empty(name: Name) -> Self {
        Self {
            name,
            extends: None,
            attributes: IndexMap::new(),
            custom_properties: IndexMap::new(),
            indexes: IndexMap::new(),
            flags: ItemFlags::default(),
            declarations: Vec::new(),
            synthetic: false,
        }
    }

    /// Union a later declaration into this record.
    ///
    /// Attributes and custom properties are last-writer-wins per name. An
    /// existing index is only overridden by a `replace` declaration. A parent
    /// set earlier is never cleared by a declaration without `extends`;
    /// when both name a parent, `policy` decides and the disagreement is
    /// returned.
    pub fn merge(&mut self, decl: ItemDecl, policy: ExtendsMergePolicy) -> Option<ConflictKind> {
        let mut conflict = None;
        if let Some(parent) = decl.extends.clone().filter(|p| !is_blank(p)) {
            match self.extends.clone() {
                None => self.extends = Some(parent),
                Some(existing) if existing == parent => {}
                Some(existing) => {
                    let (kept, ignored) = match policy {
                        ExtendsMergePolicy::FirstWins => (existing, parent),
                        ExtendsMergePolicy::LastWins => (parent, existing),
                    };
                    self.extends = Some(kept.clone());
                    conflict = Some(ConflictKind::ExtendsRedeclared { kept, ignored });
                }
            }
        }
        self.absorb(decl);
        conflict
    }

    fn absorb(&mut self, decl: ItemDecl) {
        self.flags.merge(decl.flags);
        self.synthetic = false;
        if let Some(origin) = decl.origin {
            self.declarations.push(origin);
        }

        for attr in decl.attributes {
            match MetaAttribute::from_decl(&self.name, attr) {
                Some(attr) => {
                    self.attributes.insert(attr.name.clone(), Arc::new(attr));
                }
                None => tracing::warn!("[STORE] Skipping attribute with blank name on '{}'", self.name),
            }
        }

        self.custom_properties
            .extend(collect_properties(decl.custom_properties));

        for index in decl.indexes.into_iter().filter_map(MetaItemIndex::from_decl) {
            match self.indexes.get_mut(&index.name) {
                Some(existing) if index.replace => *existing = index,
                Some(_) => {}
                None => {
                    self.indexes.insert(index.name.clone(), index);
                }
            }
        }
    }

    /// Look up an own attribute (exact, case-sensitive).
    pub fn attribute(&self, name: &str) -> Option<&Arc<MetaAttribute>> {
        self.attributes.get(name)
    }

    /// Own attributes in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = &Arc<MetaAttribute>> {
        self.attributes.values()
    }

    pub fn is_abstract(&self) -> bool {
        self.flags.is_abstract
    }

    /// Origin of the first declaration.
    pub fn origin(&self) -> Option<Origin> {
        self.declarations.first().copied()
    }

    /// Name of the next item up the chain.
    ///
    /// The explicit parent if any, otherwise `root` unless this item is the
    /// root itself.
    pub fn parent_name<'a>(&'a self, root: &'a str) -> Option<&'a str> {
        match &self.extends {
            Some(parent) => Some(parent.as_str()),
            None if self.name == root => None,
            None => Some(root),
        }
    }
}

fn trimmed(name: Name) -> Option<Name> {
    let t = name.trim();
    if t.is_empty() {
        None
    } else if t.len() == name.len() {
        Some(name)
    } else {
        Some(Name::new(t))
    }
}

fn collect_properties(properties: Vec<CustomProperty>) -> IndexMap<Name, String> {
    properties
        .into_iter()
        .filter_map(|p| trimmed(p.name).map(|name| (name, p.value)))
        .collect()
}
