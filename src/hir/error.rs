//! Error types for strict, single-target resolution.

use thiserror::Error;

use crate::base::Name;
use crate::meta::OwnerKind;

/// Why a strict lookup did not produce exactly one declaration.
///
/// Plain resolution never fails; it returns an empty or multi-candidate
/// result. These errors only come from operations that require a single
/// target, such as go-to-declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("cannot resolve '{feature}' on {owner_kind} '{owner}'")]
    Unresolved {
        owner_kind: OwnerKind,
        owner: Name,
        feature: Name,
    },

    #[error("'{feature}' on {owner_kind} '{owner}' is ambiguous ({count} candidates)")]
    Ambiguous {
        owner_kind: OwnerKind,
        owner: Name,
        feature: Name,
        count: usize,
    },

    #[error("resolution was cancelled")]
    Cancelled,
}
