use indexmap::IndexMap;

use crate::base::{Name, Origin, is_blank};
use crate::decl::EnumDecl;

/// An enumeration merged from all of its declarations.
///
/// Values keep the order in which they were first seen; a value declared
/// twice keeps its first origin.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaEnum {
    pub name: Name,
    pub values: IndexMap<Name, Option<Origin>>,
    pub dynamic: bool,
    pub declarations: Vec<Origin>,
}

impl MetaEnum {
    pub fn from_decl(decl: EnumDecl) -> Self {
        let mut meta = Self {
            name: decl.name.clone(),
            values: IndexMap::new(),
            dynamic: false,
            declarations: Vec::new(),
        };
        meta.merge(decl);
        meta
    }

    /// Union the values of a later declaration.
    pub fn merge(&mut self, decl: EnumDecl) {
        self.dynamic |= decl.dynamic;
        if let Some(origin) = decl.origin {
            self.declarations.push(origin);
        }
        for value in decl.values {
            if is_blank(&value.code) {
                tracing::warn!("[STORE] Skipping blank value of enum '{}'", self.name);
                continue;
            }
            self.values.entry(value.code).or_insert(value.origin);
        }
    }

    /// Value codes in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &Name> {
        self.values.keys()
    }

    pub fn has_value(&self, code: &str) -> bool {
        self.values.contains_key(code)
    }

    pub fn origin(&self) -> Option<Origin> {
        self.declarations.first().copied()
    }
}
