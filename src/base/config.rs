//! Engine configuration

use super::Name;
use super::constants::{IMPLICIT_ROOT_ITEM, LINK_ITEM};

/// How two partial declarations of one item that disagree on `extends` merge.
///
/// A declaration that omits `extends` never clears a parent set earlier; the
/// policy only matters when both declarations name a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtendsMergePolicy {
    /// Keep the parent from the first declaration that named one.
    #[default]
    FirstWins,
    /// Let every declaration that names a parent replace the previous one.
    LastWins,
}

/// Configuration shared by the store, the index builder and the resolver
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Implicit parent of every item without `extends`
    pub root_item_name: Name,
    /// Pseudo-item holding the attributes of relation instances
    pub link_item_name: Name,
    /// Precedence for conflicting `extends` declarations
    pub extends_policy: ExtendsMergePolicy,
    /// Add empty root and link items when the declaration set lacks them
    pub synthesize_builtins: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            root_item_name: Name::new_static(IMPLICIT_ROOT_ITEM),
            link_item_name: Name::new_static(LINK_ITEM),
            extends_policy: ExtendsMergePolicy::default(),
            synthesize_builtins: true,
        }
    }
}

impl EngineConfig {
    /// Check whether `name` is the configured root item
    pub fn is_root(&self, name: &str) -> bool {
        self.root_item_name == name
    }

    pub fn with_extends_policy(mut self, policy: ExtendsMergePolicy) -> Self {
        self.extends_policy = policy;
        self
    }
}
