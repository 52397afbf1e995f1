use text_size::{TextRange, TextSize};

use super::FileId;

/// Source location of a declaration.
///
/// Stored on every declaration record so resolution candidates can be turned
/// into "go to declaration" targets by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize, serde::Deserialize))]
pub struct Origin {
    pub file: FileId,
    pub range: TextRange,
}

impl Origin {
    pub fn new(file: FileId, range: TextRange) -> Self {
        Self { file, range }
    }

    /// Create an origin from raw byte offsets.
    pub fn from_offsets(file: FileId, start: u32, end: u32) -> Self {
        Self {
            file,
            range: TextRange::new(TextSize::from(start), TextSize::from(end)),
        }
    }
}
