//! File identifiers.

use std::fmt;

/// Identifier of a source file or front-end document.
///
/// Schema files (where declarations come from) and query/import documents
/// (where occurrences live) share the same id space; the embedding
/// application assigns the numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize, serde::Deserialize))]
pub struct FileId(u32);

impl FileId {
    /// Create a new file id from a raw index.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw index.
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}

impl From<u32> for FileId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}
