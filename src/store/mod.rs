// Store - per-entity SQL over a borrowed connection or unit of work.
//
// Every function takes `&mut SqliteConnection` so the same query runs on a
// pooled connection for reads and inside a transaction for writes.

pub mod coins;
pub mod event_categories;
pub mod events;
pub mod job_categories;
pub mod members;
pub mod wishes;

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::str::FromStr;

use crate::core::UnknownValue;
use crate::error::{AppError, AppResult};

/// Decode a TEXT column holding one of a closed set of values.
pub(crate) fn enum_column<T>(row: &SqliteRow, column: &str) -> AppResult<T>
where
    T: FromStr<Err = UnknownValue>,
{
    let raw: String = row.try_get(column)?;
    raw.parse()
        .map_err(|e: UnknownValue| AppError::DatabaseError(format!("Column {}: {}", column, e)))
}

/// Search key stored next to a name. SQLite's `LIKE` only folds ASCII,
/// so both sides of a name search are lowercased here instead.
pub(crate) fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

/// `LIKE` pattern matching `needle` anywhere; used with `ESCAPE '\'`.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("hack"), "%hack%");
        assert_eq!(contains_pattern("100%_"), "%100\\%\\_%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_fold_case_handles_non_ascii() {
        assert_eq!(fold_case("ÉTÉ Şehir"), "été şehir");
        assert_eq!(fold_case("Hack Day"), "hack day");
    }
}
