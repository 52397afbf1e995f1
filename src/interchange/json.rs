//! JSON encoding of declaration sets.
//!
//! A declaration set is a JSON array of records tagged by `kind`:
//!
//! ```json
//! [
//!   { "kind": "item", "name": "Product", "attributes": [{ "name": "code", "type_ref": "java.lang.String" }] },
//!   { "kind": "enum", "name": "OrderStatus", "values": [{ "code": "NEW" }] }
//! ]
//! ```
//!
//! Omitted fields take their defaults.

use std::io::Read;

use super::error::{InterchangeError, InterchangeResult};
use crate::decl::Declaration;

/// Decode a JSON array of declarations.
pub fn load_declarations_json(json: &str) -> InterchangeResult<Vec<Declaration>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    from_value(value)
}

/// Decode a JSON array of declarations from a reader.
pub fn read_declarations_json(reader: impl Read) -> InterchangeResult<Vec<Declaration>> {
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    from_value(value)
}

fn from_value(value: serde_json::Value) -> InterchangeResult<Vec<Declaration>> {
    if !value.is_array() {
        return Err(InterchangeError::invalid(
            "declaration set",
            "expected a JSON array of declarations",
        ));
    }
    let declarations: Vec<Declaration> = serde_json::from_value(value)?;
    tracing::debug!("[STORE] Decoded {} declarations", declarations.len());
    Ok(declarations)
}

/// Encode declarations as a pretty-printed JSON array.
pub fn to_json(declarations: &[Declaration]) -> InterchangeResult<String> {
    Ok(serde_json::to_string_pretty(declarations)?)
}
