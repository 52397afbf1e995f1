//! # typesys-base
//!
//! Semantic resolution engine for a declarative item type system: merges
//! partial type declarations into a global index and resolves feature names
//! used by embedded query and import languages to their declarations.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → AnalysisHost context object, snapshots, front-end requests
//!   ↓
//! hir       → Inheritance walker, feature resolver, resolution cache
//!   ↓
//! meta      → MetaModel index, rebuild-and-swap publication
//!   ↓
//! store     → Declaration store, merge-on-redeclare
//!   ↓
//! model     → Merged records (items, enums, relations, ...)
//!   ↓
//! decl      → Declaration records consumed from the schema parser
//!   ↓
//! base      → Primitives (FileId, Name, Origin, EngineConfig)
//! ```

// ============================================================================
// MODULES (dependency order: base → decl → model → store → meta → hir → ide)
// ============================================================================

/// Foundation types: FileId, Name, Origin, configuration
pub mod base;

/// Declaration records: items, enums, relations, collections, atomics, maps
pub mod decl;

/// Merged metamodel records
pub mod model;

/// Declaration store with merge-on-redeclare
pub mod store;

/// MetaModel index and its publication handle
pub mod meta;

/// Resolution: inheritance walking, feature resolution, caching, diagnostics
pub mod hir;

/// Host: explicit context object and front-end entry points
pub mod ide;

/// Declaration interchange: JSON
#[cfg(feature = "interchange")]
pub mod interchange;

// Re-export foundation types
pub use base::{EngineConfig, ExtendsMergePolicy, FileId, Name, Origin, TextRange, TextSize};

// Re-export the main entry points
pub use hir::{FeatureRequest, OccurrenceKey, Resolution, ResolutionCandidate, ScopeId};
pub use ide::{Analysis, AnalysisHost};
pub use meta::OwnerKind;
