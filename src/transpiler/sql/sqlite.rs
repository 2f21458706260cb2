use crate::ast::CastKind;
use crate::error::WhereResult;
use crate::transpiler::traits::{Escaper, double_single_quotes, quote_identifier};

/// SQLite escaper.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteEscaper;

impl Escaper for SqliteEscaper {
    fn name(&self) -> &'static str {
        "SQLite"
    }

    fn escape_column(&self, name: &str) -> WhereResult<String> {
        quote_identifier(name, '"')
    }

    fn escape_string(&self, value: &str) -> WhereResult<String> {
        double_single_quotes(value)
    }

    // SQLite has no DATE type; CAST(x AS DATE) yields a number, so use the date functions.
    fn cast_column(&self, name: &str, kind: CastKind) -> WhereResult<String> {
        let col = self.escape_column(name)?;
        let sql = match kind {
            CastKind::Integer => format!("CAST({} AS INTEGER)", col),
            CastKind::Decimal => format!("CAST({} AS REAL)", col),
            CastKind::Text => format!("CAST({} AS TEXT)", col),
            CastKind::Date => format!("date({})", col),
            CastKind::Timestamp => format!("datetime({})", col),
        };
        Ok(sql)
    }

    fn bool_literal(&self, val: bool) -> String {
        if val { "1".to_string() } else { "0".to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_cast_uses_function() {
        assert_eq!(
            SqliteEscaper.cast_column("fecha", CastKind::Date).unwrap(),
            r#"date("fecha")"#
        );
        assert_eq!(
            SqliteEscaper.cast_column("precio", CastKind::Decimal).unwrap(),
            r#"CAST("precio" AS REAL)"#
        );
    }
}
