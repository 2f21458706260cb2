//! # wherekit: portable WHERE clauses
//!
//! > **Structured conditions in, escaped SQL out.**
//!
//! wherekit turns condition nodes into SQL boolean expressions ready to follow a
//! `WHERE` keyword. Quoting and casting go through an injected [`Escaper`], so
//! rendering never needs a database connection.
//!
//! ## Quick Example
//!
//! ```rust
//! use wherekit::prelude::*;
//!
//! let nodes = vec![
//!     Where::column("nombre", "test")?,
//!     Where::gt("integer:codigo", 100)?,
//!     Where::or_like("descripcion|referencia", "tornillo")?,
//! ];
//!
//! let sql = join_all(&nodes, &PostgresEscaper)?;
//! assert_eq!(
//!     sql,
//!     "\"nombre\" = 'test' AND CAST(\"codigo\" AS INTEGER) > 100 OR \
//!      (LOWER(\"descripcion\") LIKE LOWER('%tornillo%') OR \
//!      LOWER(\"referencia\") LIKE LOWER('%tornillo%'))"
//! );
//! # Ok::<(), WhereError>(())
//! ```
//!
//! ## Field syntax
//!
//! | Syntax          | Meaning                           | SQL                         |
//! |-----------------|-----------------------------------|-----------------------------|
//! | `a\|b`          | Any of several columns            | `(a ... OR b ...)`          |
//! | `integer:a`     | Cast before comparing             | `CAST(a AS INTEGER)`        |
//! | `field:b`       | Value names another column        | `a < b`                     |

pub mod ast;
pub mod config;
pub mod error;
pub mod parser;
pub mod transpiler;

pub use transpiler::join_all;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::config::Config;
    pub use crate::error::*;
    pub use crate::parser::parse;
    pub use crate::transpiler::{
        Dialect, Escaper, MySqlEscaper, PostgresEscaper, SqliteEscaper, ToSql, join_all,
    };
}

/// Parse a shorthand condition string into nodes.
///
/// # Example
///
/// ```
/// use wherekit::prelude::*;
///
/// let nodes = wherekit::parse("disponible < field:cantidad").unwrap();
/// assert_eq!(join_all(&nodes, &MySqlEscaper).unwrap(), "`disponible` < `cantidad`");
/// ```
pub fn parse(input: &str) -> Result<Vec<ast::Where>, error::WhereError> {
    parser::parse(input)
}
