//! Foundation types for the typesys engine.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Interned identifiers for schema files and front-end documents
//! - [`Name`] - Cheap-to-clone identifier strings
//! - [`Origin`] - Where a declaration came from (file + text range)
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`EngineConfig`] - Engine-wide configuration
//! - Domain constants (root item, link item, reserved feature names)
//!
//! This module has NO dependencies on other typesys modules.

mod config;
pub mod constants;
mod file_id;
mod origin;
mod text;

pub use config::{EngineConfig, ExtendsMergePolicy};
pub use file_id::FileId;
pub use origin::Origin;
pub use text::{eq_ignore_case, is_blank};
pub use text_size::{TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;

/// An identifier in the type system (item, attribute, enum, relation, qualifier).
///
/// Inline for short names, so cloning is cheap in the common case.
pub type Name = smol_str::SmolStr;
