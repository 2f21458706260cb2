//! The escaping collaborator interface.

use crate::ast::{CastKind, Value};
use crate::error::{WhereError, WhereResult};

/// Dialect-specific quoting and casting.
///
/// Rendering never touches a database; everything it needs to know about the
/// target SQL dialect goes through this trait. Implementations must not keep
/// mutable state, so one instance can be shared across threads.
pub trait Escaper: Send + Sync {
    /// Name of the dialect (e.g., "PostgreSQL").
    fn name(&self) -> &'static str;

    /// Quote a column identifier. Dotted names (`table.column`) quote each part.
    fn escape_column(&self, name: &str) -> WhereResult<String>;

    /// Escape the contents of a string literal, without surrounding quotes.
    fn escape_string(&self, value: &str) -> WhereResult<String>;

    /// Render a column wrapped in the dialect's cast syntax for `kind`.
    fn cast_column(&self, name: &str, kind: CastKind) -> WhereResult<String>;

    /// Boolean literal (TRUE/FALSE vs 1/0).
    fn bool_literal(&self, val: bool) -> String {
        if val {
            "TRUE".to_string()
        } else {
            "FALSE".to_string()
        }
    }

    /// Render any scalar as a complete SQL literal, quotes included.
    fn literal(&self, value: &Value) -> WhereResult<String> {
        let sql = match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => self.bool_literal(*b),
            Value::Int(n) => n.to_string(),
            Value::Float(n) if !n.is_finite() => {
                return Err(WhereError::escape(format!("cannot render float {} as SQL", n)));
            }
            Value::Float(n) => n.to_string(),
            Value::String(s) => format!("'{}'", self.escape_string(s)?),
            Value::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
            Value::DateTime(dt) => format!("'{}'", dt.format("%Y-%m-%d %H:%M:%S")),
        };
        Ok(sql)
    }
}

/// Quote an identifier with `quote`, doubling embedded quote characters.
/// Handles dotted identifiers (e.g., `table.column`) by quoting each part.
pub fn quote_identifier(name: &str, quote: char) -> WhereResult<String> {
    name
        .split('.')
        .map(|part| {
            if part.is_empty() {
                return Err(WhereError::escape(format!("empty identifier in '{}'", name)));
            }
            if part.contains('\0') {
                return Err(WhereError::escape("identifier contains a NUL byte"));
            }
            let doubled = format!("{}{}", quote, quote);
            Ok(format!(
                "{}{}{}",
                quote,
                part.replace(quote, &doubled),
                quote
            ))
        })
        .collect::<WhereResult<Vec<_>>>()
        .map(|parts| parts.join("."))
}

/// Standard SQL string escaping: single quotes doubled, NUL refused.
pub fn double_single_quotes(value: &str) -> WhereResult<String> {
    if value.contains('\0') {
        return Err(WhereError::escape("string literal contains a NUL byte"));
    }
    Ok(value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("name", '"').unwrap(), r#""name""#);
        assert_eq!(quote_identifier("users.id", '`').unwrap(), "`users`.`id`");
        assert_eq!(quote_identifier(r#"we"ird"#, '"').unwrap(), r#""we""ird""#);
    }

    #[test]
    fn test_quote_identifier_rejects_empty() {
        assert!(quote_identifier("", '"').is_err());
        assert!(quote_identifier("users.", '"').is_err());
    }

    #[test]
    fn test_double_single_quotes() {
        assert_eq!(double_single_quotes("O'Brien").unwrap(), "O''Brien");
        assert!(double_single_quotes("a\0b").is_err());
    }
}
