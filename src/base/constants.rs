//! Domain constants shared across the engine.

/// Item every item implicitly extends when it declares no parent.
pub const IMPLICIT_ROOT_ITEM: &str = "GenericItem";

/// Synthetic item whose attributes apply to every relation occurrence.
pub const LINK_ITEM: &str = "Link";

/// Feature name selecting the source end of a relation (case-insensitive).
pub const SOURCE_FEATURE: &str = "source";

/// Feature name selecting the target end of a relation (case-insensitive).
pub const TARGET_FEATURE: &str = "target";

/// Enum pseudo-feature resolving to the enum itself.
pub const CODE_FEATURE: &str = "code";

/// Enum pseudo-feature resolving to the enum itself.
pub const NAME_FEATURE: &str = "name";

/// Feature names that resolve on an enum owner.
pub const ENUM_FEATURES: &[&str] = &[CODE_FEATURE, NAME_FEATURE];
