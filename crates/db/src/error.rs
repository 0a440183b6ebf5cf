//! Typed error type for the db crate.
//!
//! "Not found" is deliberately *not* an error here: `call_single` returns
//! `Option::None` for an empty row-set and callers treat absence as a
//! normal, checkable outcome.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// Transport failure: connection lost, unknown function, argument type
    /// mismatch.  Not recoverable inside the gateway.
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// The function name contains characters outside the identifier charset
    /// and was rejected before reaching the database.
    #[error("invalid function name: '{0}'")]
    InvalidFunctionName(String),

    /// A mutating function reported `success != true`; `message` carries the
    /// human-readable cause supplied by the function itself.
    #[error("business rule rejected: {message}")]
    BusinessRule { message: String },
}
