//! Diagnostics: unresolved and ambiguous feature references.
//!
//! The engine only reports; rendering (squiggles, quick-fixes) belongs to the
//! embedded-language front ends.

use std::sync::Arc;

use super::cache::OccurrenceKey;
use super::error::ResolveError;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

/// A diagnostic attached to one occurrence.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    /// The occurrence, when the request carried one.
    pub key: Option<OccurrenceKey>,
    pub severity: Severity,
    /// Stable code from [`codes`].
    pub code: &'static str,
    pub message: Arc<str>,
}

impl Diagnostic {
    pub fn error(key: Option<OccurrenceKey>, code: &'static str, message: impl Into<Arc<str>>) -> Self {
        Self {
            key,
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(key: Option<OccurrenceKey>, code: &'static str, message: impl Into<Arc<str>>) -> Self {
        Self {
            key,
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Map a strict-lookup failure. Cancellation is not reported.
    pub fn from_resolve_error(key: Option<OccurrenceKey>, error: &ResolveError) -> Option<Self> {
        match error {
            ResolveError::Unresolved { .. } => {
                Some(Self::error(key, codes::UNRESOLVED_FEATURE, error.to_string()))
            }
            ResolveError::Ambiguous { .. } => {
                Some(Self::warning(key, codes::AMBIGUOUS_FEATURE, error.to_string()))
            }
            ResolveError::Cancelled => None,
        }
    }
}

/// Diagnostic codes.
pub mod codes {
    /// Feature name does not resolve on its owner.
    pub const UNRESOLVED_FEATURE: &str = "E0001";
    /// Owner type is not declared.
    pub const UNKNOWN_OWNER: &str = "E0002";
    /// A strict lookup found more than one declaration.
    pub const AMBIGUOUS_FEATURE: &str = "W0001";
}
