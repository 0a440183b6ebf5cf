//! `db` crate — the database function gateway.
//!
//! Every piece of business logic in this system lives inside PostgreSQL
//! stored functions; this crate is the one place that calls them.  It
//! provides a connection pool, a generic function invoker, result-shape
//! normalization, pagination arithmetic, and thin per-resource gateways.
//! No SQL is written here beyond the invocation form `SELECT * FROM fn(…)`.

pub mod decode;
pub mod error;
pub mod invoker;
pub mod normalize;
pub mod pagination;
pub mod pool;
pub mod repository;

pub use error::DbError;
pub use invoker::{FunctionInvoker, PgInvoker};
pub use normalize::{Normalized, Row};
pub use pagination::{PageParams, Paginated, Pagination};
pub use pool::DbPool;
