//! Error types for declaration ingestion.

use thiserror::Error;

use super::DeclKind;
use crate::base::Origin;

/// Errors that reject a declaration record outright.
///
/// Everything else about a malformed declaration (blank attribute names,
/// relation ends without a type) is tolerated and logged during the merge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// The record has no usable name to register under.
    #[error("{kind} declaration has a blank name")]
    BlankName {
        kind: DeclKind,
        origin: Option<Origin>,
    },
}

impl DeclarationError {
    /// Where the rejected declaration came from, if known.
    pub fn origin(&self) -> Option<Origin> {
        match self {
            DeclarationError::BlankName { origin, .. } => *origin,
        }
    }
}
