use crate::ast::CastKind;
use crate::error::WhereResult;
use crate::transpiler::traits::{Escaper, quote_identifier};

/// MySQL / MariaDB escaper.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlEscaper;

impl Escaper for MySqlEscaper {
    fn name(&self) -> &'static str {
        "MySQL"
    }

    fn escape_column(&self, name: &str) -> WhereResult<String> {
        quote_identifier(name, '`')
    }

    /// Same character set as `mysql_real_escape_string`; `%` and `_` pass through.
    fn escape_string(&self, value: &str) -> WhereResult<String> {
        let mut escaped = String::with_capacity(value.len());
        for c in value.chars() {
            match c {
                '\\' => escaped.push_str("\\\\"),
                '\'' => escaped.push_str("\\'"),
                '"' => escaped.push_str("\\\""),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\0' => escaped.push_str("\\0"),
                '\x1a' => escaped.push_str("\\Z"),
                c => escaped.push(c),
            }
        }
        Ok(escaped)
    }

    fn cast_column(&self, name: &str, kind: CastKind) -> WhereResult<String> {
        let sql_type = match kind {
            CastKind::Integer => "SIGNED",
            CastKind::Decimal => "DECIMAL(65,10)",
            CastKind::Text => "CHAR",
            CastKind::Date => "DATE",
            CastKind::Timestamp => "DATETIME",
        };
        Ok(format!("CAST({} AS {})", self.escape_column(name)?, sql_type))
    }

    fn bool_literal(&self, val: bool) -> String {
        if val { "1".to_string() } else { "0".to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Value;

    #[test]
    fn test_escape_string() {
        let my = MySqlEscaper;
        assert_eq!(my.escape_string(r"a'b\c").unwrap(), r"a\'b\\c");
        assert_eq!(my.escape_string("50%_off").unwrap(), "50%_off");
        assert_eq!(my.escape_string("line\nbreak").unwrap(), "line\\nbreak");
    }

    #[test]
    fn test_column_and_bool() {
        let my = MySqlEscaper;
        assert_eq!(my.escape_column("orders.total").unwrap(), "`orders`.`total`");
        assert_eq!(my.literal(&Value::Bool(false)).unwrap(), "0");
        assert_eq!(
            my.cast_column("codigo", CastKind::Integer).unwrap(),
            "CAST(`codigo` AS SIGNED)"
        );
    }
}
