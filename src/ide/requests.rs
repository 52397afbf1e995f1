//! Request builders for the two embedded languages.
//!
//! Both front ends name the owner as plain text (an import header type, or
//! the table of a query column) without saying what kind of declaration it
//! is, so the kind is looked up in the model.

use crate::base::Name;
use crate::hir::{FeatureRequest, OccurrenceKey};
use crate::meta::MetaModel;

impl FeatureRequest {
    /// A parameter of a bulk-import header, e.g. `code` in
    /// `INSERT_UPDATE Product; code[unique = true]`.
    ///
    /// The parameter text is expected without its `[...]` modifiers.
    /// Special columns (`@media`) and unknown owners yield `None`.
    pub fn import_header(
        model: &MetaModel,
        header_type: &str,
        parameter: &str,
        key: OccurrenceKey,
    ) -> Option<Self> {
        let parameter = parameter.trim();
        if parameter.is_empty() || parameter.starts_with('@') {
            return None;
        }
        Self::detected(model, header_type.trim(), parameter, key)
    }

    /// A column reference of the query language, e.g. `{p.code}`,
    /// `{p:name[en]}` or `{code:o}`.
    ///
    /// The table alias, the language qualifier and the join modifier are
    /// stripped before resolving.
    ///
    /// `{p:c}` is ambiguous between column `p` with join modifier `c` and
    /// column `c` of alias `p`. It is read as the former; write `{p.c}` or
    /// `{p:c:o}` for the latter.
    pub fn query_column(model: &MetaModel, table: &str, column: &str, key: OccurrenceKey) -> Option<Self> {
        let feature = column_feature(column)?;
        Self::detected(model, table.trim(), feature, key)
    }

    fn detected(model: &MetaModel, owner: &str, feature: &str, key: OccurrenceKey) -> Option<Self> {
        let Some(kind) = model.owner_kind_of(owner) else {
            tracing::trace!("[RESOLVE] No owner kind for '{}'", owner);
            return None;
        };
        Some(Self::new(kind, Name::new(owner), Name::new(feature)).inherited().with_key(key))
    }
}

/// The bare feature name of a query column reference.
fn column_feature(column: &str) -> Option<&str> {
    let mut text = column.trim();
    text = text.strip_prefix('{').unwrap_or(text);
    text = text.strip_suffix('}').unwrap_or(text);

    if let Some((_, rest)) = text.split_once('.') {
        text = rest;
    } else if let Some((_, rest)) = text.split_once(':') {
        // a lone `:o` after the first segment is a join modifier
        if !is_join_modifier(rest) {
            text = rest;
        }
    }
    if let Some((name, modifier)) = text.rsplit_once(':') {
        if is_join_modifier(modifier) {
            text = name;
        }
    }
    if let Some(open) = text.find('[') {
        text = &text[..open];
    }

    let text = text.trim();
    (!text.is_empty()).then_some(text)
}

fn is_join_modifier(text: &str) -> bool {
    matches!(text, "o" | "c" | "l")
}
