//! Resource gateways — one module per resource family.
//!
//! Each gateway is a thin binding: a fixed stored-function name, a fixed
//! positional argument order, a `call`/`call_single` choice, and optional
//! pagination wrapping.  No business logic lives here; the stored functions
//! own validation and business rules.

pub mod companies;
pub mod menus;
pub mod permissions;


use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::decode::decode_known_fields;
use crate::invoker;
use crate::normalize::{classify, Normalized, Row};
use crate::pagination::{self, PageParams, Paginated};
use crate::{DbError, FunctionInvoker};

/// Filter parameters shared by every list operation.  Defaults are the
/// single source of truth for `busqueda = ""`, `limit = 10`, `offset = 0`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub busqueda: String,
    #[serde(default = "pagination::default_limit")]
    pub limit: i64,
    #[serde(default = "pagination::default_offset")]
    pub offset: i64,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            busqueda: String::new(),
            limit: pagination::DEFAULT_LIMIT,
            offset: pagination::DEFAULT_OFFSET,
        }
    }
}

impl ListParams {
    pub fn page(&self) -> PageParams {
        PageParams { limit: self.limit, offset: self.offset }
    }
}

/// Result of a mutating stored function.  By convention the first result
/// row carries `success` and `message`; create functions also return the
/// new row's `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

/// Invoke a list-shaped function and wrap the result in the pagination
/// envelope.  A count-less row-set degrades to `total = rows.len()`.
pub(crate) async fn list_paginated(
    inv: &dyn FunctionInvoker,
    function: &str,
    args: &[Value],
    page: PageParams,
) -> Result<Paginated<Row>, DbError> {
    let rows = invoker::call(inv, function, args).await?;
    match classify(rows) {
        Normalized::Empty => Ok(Paginated::empty(page)),
        Normalized::Paginated { mut rows, total } => {
            decode_known_fields(&mut rows);
            Ok(Paginated::new(rows, total, page))
        }
        Normalized::Single(row) => {
            let mut rows = vec![row];
            decode_known_fields(&mut rows);
            Ok(Paginated::new(rows, 1, page))
        }
        Normalized::List(mut rows) => {
            decode_known_fields(&mut rows);
            let total = rows.len() as i64;
            Ok(Paginated::new(rows, total, page))
        }
        Normalized::NestedJson(_) => {
            warn!(function, "list function returned a nested JSON payload");
            Ok(Paginated::empty(page))
        }
    }
}

/// Invoke a mutating function and interpret its convention row.
///
/// Absence of `success == true` — including a zero-row result — is a
/// business-rule failure, propagated outward, never retried.
pub(crate) async fn mutate(
    inv: &dyn FunctionInvoker,
    function: &str,
    args: &[Value],
) -> Result<MutationOutcome, DbError> {
    let row = invoker::call_single(inv, function, args).await?;
    let Some(row) = row else {
        return Err(DbError::BusinessRule {
            message: format!("{function} returned no result row"),
        });
    };

    let success = matches!(row.get("success"), Some(Value::Bool(true)));
    let message = row
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    if !success {
        let message = if message.is_empty() {
            format!("{function} rejected the operation")
        } else {
            message
        };
        return Err(DbError::BusinessRule { message });
    }

    Ok(MutationOutcome {
        success: true,
        message,
        id: row.get("id").and_then(Value::as_i64),
    })
}
