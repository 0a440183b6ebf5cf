//! Result-shape classification.
//!
//! The stored functions return heterogeneous shapes with no fixed schema:
//! nothing, a single row, a plain row-set, a row-set carrying an embedded
//! `total_registros` count column, or one row whose single column is a
//! pre-serialized JSON payload.  Classification happens here once, into an
//! explicit tagged variant, instead of ad hoc property probing at each
//! call site.

use serde_json::Value;
use tracing::warn;

/// One dynamically-typed result row.  Keys are lower-cased by the invoker.
pub type Row = serde_json::Map<String, Value>;

/// Convention column carrying the un-paginated total on every row of a
/// paginated result.
pub const TOTAL_COLUMN: &str = "total_registros";

/// Canonical shapes a raw row-set can take.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// No rows.  Lists render as `[]`, single-object lookups as not-found.
    Empty,
    /// Exactly one row, no count column.
    Single(Row),
    /// Two or more rows, no count column.
    List(Vec<Row>),
    /// Every row carried `total_registros`; the column is stripped from the
    /// rows and surfaced only through `total`.
    Paginated { rows: Vec<Row>, total: i64 },
    /// One row, one column, holding a string that parsed as JSON.
    NestedJson(Value),
}

/// Classify a raw row-set.
///
/// A single-row, single-column string that fails to parse as JSON is not an
/// error: it degrades to `Single` with the raw string intact.
pub fn classify(mut rows: Vec<Row>) -> Normalized {
    if rows.is_empty() {
        return Normalized::Empty;
    }

    if rows.iter().all(|r| r.contains_key(TOTAL_COLUMN)) {
        let total = match rows.first().and_then(|r| r.get(TOTAL_COLUMN)).and_then(count_value) {
            Some(total) => total,
            None => {
                warn!("unreadable {TOTAL_COLUMN} value, falling back to row count");
                rows.len() as i64
            }
        };
        for row in &mut rows {
            row.remove(TOTAL_COLUMN);
        }
        return Normalized::Paginated { rows, total };
    }

    if rows.len() == 1 && rows[0].len() == 1 {
        let row = rows.pop().unwrap_or_default();
        if let Some((_, Value::String(s))) = row.iter().next() {
            if let Ok(parsed) = serde_json::from_str::<Value>(s) {
                return Normalized::NestedJson(parsed);
            }
        }
        return Normalized::Single(row);
    }

    if rows.len() == 1 {
        let row = rows.pop().unwrap_or_default();
        return Normalized::Single(row);
    }

    Normalized::List(rows)
}

/// The count column arrives as int8, numeric text, or occasionally a float;
/// `None` means the value is unreadable and the caller picks a fallback.
fn count_value(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(v: Value) -> Row {
        v.as_object().cloned().expect("test row must be an object")
    }

    #[test]
    fn empty_rowset_is_empty() {
        assert_eq!(classify(vec![]), Normalized::Empty);
    }

    #[test]
    fn single_row_without_count_is_single() {
        let r = row(json!({"id": 7, "nombre": "Acme"}));
        assert_eq!(classify(vec![r.clone()]), Normalized::Single(r));
    }

    #[test]
    fn multiple_rows_without_count_are_a_plain_list() {
        let rows = vec![row(json!({"id": 1})), row(json!({"id": 2}))];
        assert_eq!(classify(rows.clone()), Normalized::List(rows));
    }

    #[test]
    fn count_column_on_every_row_is_paginated_and_stripped() {
        let rows = vec![
            row(json!({"id": 1, "nombre": "a", "total_registros": 25})),
            row(json!({"id": 2, "nombre": "b", "total_registros": 25})),
        ];
        match classify(rows) {
            Normalized::Paginated { rows, total } => {
                assert_eq!(total, 25);
                assert_eq!(rows.len(), 2);
                assert!(rows.iter().all(|r| !r.contains_key(TOTAL_COLUMN)));
                assert_eq!(rows[0]["nombre"], "a");
            }
            other => panic!("expected Paginated, got {other:?}"),
        }
    }

    #[test]
    fn count_column_as_numeric_string_is_parsed() {
        let rows = vec![row(json!({"id": 1, "total_registros": "42"}))];
        match classify(rows) {
            Normalized::Paginated { total, .. } => assert_eq!(total, 42),
            other => panic!("expected Paginated, got {other:?}"),
        }
    }

    #[test]
    fn unreadable_count_falls_back_to_row_count() {
        let rows = vec![
            row(json!({"id": 1, "total_registros": "veinticinco"})),
            row(json!({"id": 2, "total_registros": "veinticinco"})),
        ];
        match classify(rows) {
            Normalized::Paginated { rows, total } => {
                assert_eq!(total, 2);
                assert_eq!(rows.len(), 2);
            }
            other => panic!("expected Paginated, got {other:?}"),
        }
    }

    #[test]
    fn null_count_falls_back_to_row_count() {
        let rows = vec![row(json!({"id": 1, "total_registros": null}))];
        match classify(rows) {
            Normalized::Paginated { total, .. } => assert_eq!(total, 1),
            other => panic!("expected Paginated, got {other:?}"),
        }
    }

    #[test]
    fn count_column_on_only_some_rows_is_not_paginated() {
        let rows = vec![
            row(json!({"id": 1, "total_registros": 2})),
            row(json!({"id": 2})),
        ];
        assert!(matches!(classify(rows), Normalized::List(_)));
    }

    #[test]
    fn single_string_column_that_parses_is_nested_json() {
        let rows = vec![row(json!({"arbol": "[{\"id\":1,\"hijos\":[]}]"}))];
        match classify(rows) {
            Normalized::NestedJson(v) => {
                assert_eq!(v[0]["id"], 1);
                assert_eq!(v[0]["hijos"], json!([]));
            }
            other => panic!("expected NestedJson, got {other:?}"),
        }
    }

    #[test]
    fn single_string_column_that_fails_to_parse_degrades_to_single() {
        let rows = vec![row(json!({"arbol": "{invalid"}))];
        match classify(rows) {
            Normalized::Single(r) => assert_eq!(r["arbol"], "{invalid"),
            other => panic!("expected Single, got {other:?}"),
        }
    }

    #[test]
    fn single_non_string_single_column_row_is_single() {
        let rows = vec![row(json!({"id": 3}))];
        assert!(matches!(classify(rows), Normalized::Single(_)));
    }

    #[test]
    fn classification_is_deterministic() {
        let rows = vec![row(json!({"id": 1, "total_registros": 5}))];
        assert_eq!(classify(rows.clone()), classify(rows));
    }
}
