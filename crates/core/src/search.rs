//! Helpers for the case-insensitive substring filters on list endpoints.

/// Escape character used in generated `LIKE` patterns.
pub const LIKE_ESCAPE: char = '\\';

/// Build an `ILIKE` pattern matching `needle` anywhere in a column.
///
/// `%`, `_` and the escape character are escaped so user input is always
/// matched literally. Pair with `ESCAPE '\'` in the SQL.
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Normalise an optional query-string filter: blank values mean "no filter".
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
