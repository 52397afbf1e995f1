//! Declaration interchange: JSON encoding of declaration sets.
//!
//! Lets an embedding application hand the engine declarations produced by an
//! out-of-process schema parser.

mod error;
mod json;

pub use error::{InterchangeError, InterchangeResult};
pub use json::{load_declarations_json, read_declarations_json, to_json};
