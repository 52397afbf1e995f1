//! Text helpers for identifier comparison.

/// Case-insensitive identifier equality without allocating.
///
/// Relation role qualifiers and the `source`/`target` feature names compare
/// this way; attribute names never do.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Check whether a name is empty or whitespace only.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
