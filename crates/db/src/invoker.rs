//! Stored-function invocation — the only code that talks to Postgres.
//!
//! The gateway never writes SQL beyond the invocation form
//! `SELECT * FROM fn($1, …, $n)`.  Arguments are bound positionally; the
//! caller is responsible for supplying them in the function's declared
//! parameter order, with explicit nulls for omitted optionals (never
//! dropped positionally).
//!
//! Returned rows have no fixed schema, so every column is converted to a
//! `serde_json::Value` by its Postgres type name.  Column names are
//! lower-cased here, once, so the normalizer can match them directly.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::{Column, Row as _, TypeInfo};
use tracing::{debug, warn};

use crate::normalize::Row;
use crate::{DbError, DbPool};

/// The sole interface to the data store.
///
/// A trait rather than a concrete type so the resource gateways can be
/// exercised in tests against an in-memory mock with no live Postgres.
#[async_trait]
pub trait FunctionInvoker: Send + Sync {
    /// Execute the named stored function with positional arguments and
    /// return the raw row-set.  One round trip, no retry, no caching.
    async fn invoke(&self, name: &str, args: &[Value]) -> Result<Vec<Row>, DbError>;
}

/// `FunctionInvoker` backed by a shared sqlx connection pool.
///
/// Holds no per-call state; pooling and serialization of individual calls
/// belong to sqlx.
#[derive(Clone)]
pub struct PgInvoker {
    pool: DbPool,
}

impl PgInvoker {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FunctionInvoker for PgInvoker {
    async fn invoke(&self, name: &str, args: &[Value]) -> Result<Vec<Row>, DbError> {
        let sql = invocation_sql(name, args.len())?;
        debug!(function = name, args = args.len(), "invoking stored function");

        let mut query = sqlx::query(&sql);
        for arg in args {
            query = match arg {
                Value::Null => query.bind(None::<String>),
                Value::Bool(b) => query.bind(*b),
                Value::Number(n) => match n.as_i64() {
                    Some(i) => query.bind(i),
                    None => query.bind(n.as_f64().unwrap_or(0.0)),
                },
                Value::String(s) => query.bind(s.as_str()),
                // Structured arguments go over as jsonb.
                other => query.bind(sqlx::types::Json(other.clone())),
            };
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_json).collect())
    }
}

/// `invoke` + full row-set, for list-shaped functions.
pub async fn call(
    inv: &dyn FunctionInvoker,
    name: &str,
    args: &[Value],
) -> Result<Vec<Row>, DbError> {
    inv.invoke(name, args).await
}

/// `invoke` + first row.  An empty row-set is `None`, not an error:
/// callers treat "not found" as a normal, checkable outcome.
pub async fn call_single(
    inv: &dyn FunctionInvoker,
    name: &str,
    args: &[Value],
) -> Result<Option<Row>, DbError> {
    let rows = inv.invoke(name, args).await?;
    Ok(rows.into_iter().next())
}

/// Build `SELECT * FROM name($1, …, $n)` after checking the name against
/// the identifier charset.  Unknown-but-well-formed names are left for the
/// transport boundary to reject.
fn invocation_sql(name: &str, arg_count: usize) -> Result<String, DbError> {
    if !is_valid_function_name(name) {
        return Err(DbError::InvalidFunctionName(name.to_string()));
    }
    let placeholders: Vec<String> = (1..=arg_count).map(|i| format!("${i}")).collect();
    Ok(format!("SELECT * FROM {}({})", name, placeholders.join(", ")))
}

/// Identifier charset: ASCII alphanumerics, `_`, and `.` for schema
/// qualification.  Must not be empty or start with a digit/dot.
fn is_valid_function_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Convert one dynamically-typed row into a JSON object keyed by
/// lower-cased column name.
fn row_to_json(row: &PgRow) -> Row {
    let mut out = Row::new();
    for col in row.columns() {
        let key = col.name().to_lowercase();
        out.insert(key, column_to_value(row, col.ordinal(), col.type_info().name()));
    }
    out
}

/// Decode a single column by Postgres type name, degrading to a string and
/// finally to null rather than failing the whole row-set over one odd
/// column type.
fn column_to_value(row: &PgRow, idx: usize, type_name: &str) -> Value {
    match type_name {
        "BOOL" => row
            .try_get::<Option<bool>, _>(idx)
            .map(Value::from)
            .unwrap_or(Value::Null),
        "INT2" => row
            .try_get::<Option<i16>, _>(idx)
            .map(Value::from)
            .unwrap_or(Value::Null),
        "INT4" => row
            .try_get::<Option<i32>, _>(idx)
            .map(Value::from)
            .unwrap_or(Value::Null),
        "INT8" => row
            .try_get::<Option<i64>, _>(idx)
            .map(Value::from)
            .unwrap_or(Value::Null),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(idx)
            .map(Value::from)
            .unwrap_or(Value::Null),
        "FLOAT8" => row
            .try_get::<Option<f64>, _>(idx)
            .map(Value::from)
            .unwrap_or(Value::Null),
        "JSON" | "JSONB" => row
            .try_get::<Option<Value>, _>(idx)
            .map(|v| v.unwrap_or(Value::Null))
            .unwrap_or(Value::Null),
        "DATE" => row
            .try_get::<Option<chrono::NaiveDate>, _>(idx)
            .map(|v| v.map(|d| Value::String(d.to_string())).unwrap_or(Value::Null))
            .unwrap_or(Value::Null),
        "TIMESTAMP" => row
            .try_get::<Option<chrono::NaiveDateTime>, _>(idx)
            .map(|v| v.map(|t| Value::String(t.to_string())).unwrap_or(Value::Null))
            .unwrap_or(Value::Null),
        "TIMESTAMPTZ" => row
            .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(idx)
            .map(|v| v.map(|t| Value::String(t.to_rfc3339())).unwrap_or(Value::Null))
            .unwrap_or(Value::Null),
        other => match row.try_get::<Option<String>, _>(idx) {
            Ok(Some(s)) => Value::String(s),
            Ok(None) => Value::Null,
            Err(_) => {
                warn!(column_type = other, "undecodable column type, returning null");
                Value::Null
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_sql_numbers_placeholders() {
        let sql = invocation_sql("empresas_listar", 3).unwrap();
        assert_eq!(sql, "SELECT * FROM empresas_listar($1, $2, $3)");
    }

    #[test]
    fn invocation_sql_with_no_args() {
        let sql = invocation_sql("menus_opciones_listar", 0).unwrap();
        assert_eq!(sql, "SELECT * FROM menus_opciones_listar()");
    }

    #[test]
    fn schema_qualified_names_are_accepted() {
        assert!(invocation_sql("admin.empresas_listar", 1).is_ok());
    }

    #[test]
    fn injection_shaped_names_are_rejected() {
        for bad in ["fn(); DROP TABLE x; --", "fn name", "1fn", "", "fn;"] {
            assert!(matches!(
                invocation_sql(bad, 0),
                Err(DbError::InvalidFunctionName(_))
            ));
        }
    }
}
