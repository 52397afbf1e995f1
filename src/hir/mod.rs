//! Resolution layer: inheritance walking, feature resolution and caching.
//!
//! Everything here reads a published [`MetaModel`](crate::meta::MetaModel)
//! snapshot; nothing mutates it.
//!
//! ## Key Types
//!
//! - [`InheritanceWalker`] / [`Ancestry`] - cycle-safe `extends` traversal
//! - [`FeatureResolver`] - `(owner, feature)` → [`Resolution`]
//! - [`ResolutionCache`] - per-occurrence memoization keyed by [`OccurrenceKey`]
//! - [`Diagnostic`] - unresolved-reference reporting
//!
//! ## Query Layers
//!
//! ```text
//! FeatureRequest            ← from an embedded-language front end
//!     │
//!     ▼
//! ResolutionCache::get      ← hit if same generation + fingerprint
//!     │ miss
//!     ▼
//! FeatureResolver           ← dispatch on OwnerKind
//!     │
//!     ▼
//! InheritanceWalker         ← item, then ancestors
//!     │
//!     ▼
//! MetaModel lookups         ← items, reference ends, link item
//! ```

mod cache;
mod candidate;
mod diagnostics;
mod error;
mod resolve;
mod walk;

pub use cache::{OccurrenceKey, RequestFingerprint, ResolutionCache, ScopeId};
pub use candidate::{Resolution, ResolutionCandidate};
pub use diagnostics::{Diagnostic, Severity, codes};
pub use error::ResolveError;
pub use resolve::{FeatureRequest, FeatureResolver};
pub use walk::{Ancestry, InheritanceWalker};
