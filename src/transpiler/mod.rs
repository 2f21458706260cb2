//! SQL rendering for condition nodes.
//!
//! Converts [`Where`](crate::ast::Where) nodes into boolean expressions ready to
//! follow a `WHERE` keyword, quoting everything through an [`Escaper`].

pub mod conditions;
pub mod dialect;
pub mod sql;
pub mod traits;

pub use conditions::{ToSql, join_all};
pub use dialect::Dialect;
pub use sql::mysql::MySqlEscaper;
pub use sql::postgres::PostgresEscaper;
pub use sql::sqlite::SqliteEscaper;
pub use traits::Escaper;
