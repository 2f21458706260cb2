use crate::ast::CastKind;
use crate::error::WhereResult;
use crate::transpiler::traits::{Escaper, double_single_quotes, quote_identifier};

/// PostgreSQL escaper.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresEscaper;

impl Escaper for PostgresEscaper {
    fn name(&self) -> &'static str {
        "PostgreSQL"
    }

    fn escape_column(&self, name: &str) -> WhereResult<String> {
        quote_identifier(name, '"')
    }

    fn escape_string(&self, value: &str) -> WhereResult<String> {
        double_single_quotes(value)
    }

    fn cast_column(&self, name: &str, kind: CastKind) -> WhereResult<String> {
        let sql_type = match kind {
            CastKind::Integer => "INTEGER",
            CastKind::Decimal => "NUMERIC",
            CastKind::Text => "TEXT",
            CastKind::Date => "DATE",
            CastKind::Timestamp => "TIMESTAMP",
        };
        Ok(format!("CAST({} AS {})", self.escape_column(name)?, sql_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Value;

    #[test]
    fn test_literals() {
        let pg = PostgresEscaper;
        assert_eq!(pg.literal(&Value::from("it's")).unwrap(), "'it''s'");
        assert_eq!(pg.literal(&Value::Bool(true)).unwrap(), "TRUE");
        assert_eq!(pg.literal(&Value::Null).unwrap(), "NULL");
        assert!(pg.literal(&Value::Float(f64::NAN)).is_err());
    }

    #[test]
    fn test_cast() {
        assert_eq!(
            PostgresEscaper.cast_column("codigo", CastKind::Integer).unwrap(),
            r#"CAST("codigo" AS INTEGER)"#
        );
    }
}
