use crate::ast::*;
use crate::error::{WhereError, WhereResult};
use crate::transpiler::traits::Escaper;

/// Trait for converting nodes to SQL.
pub trait ToSql {
    /// Render as a SQL boolean expression for the escaper's dialect.
    fn to_sql(&self, escaper: &dyn Escaper) -> WhereResult<String>;
}

impl ToSql for Where {
    fn to_sql(&self, escaper: &dyn Escaper) -> WhereResult<String> {
        match self.kind() {
            WhereKind::Condition(cond) => cond.to_sql(escaper),
            WhereKind::Group(nodes) => Ok(format!("({})", join_all(nodes, escaper)?)),
        }
    }
}

impl ToSql for [Where] {
    fn to_sql(&self, escaper: &dyn Escaper) -> WhereResult<String> {
        join_all(self, escaper)
    }
}

impl ToSql for Vec<Where> {
    fn to_sql(&self, escaper: &dyn Escaper) -> WhereResult<String> {
        join_all(self, escaper)
    }
}

impl Where {
    /// Render this node alone. Its own joiner is not emitted.
    pub fn render(&self, escaper: &dyn Escaper) -> WhereResult<String> {
        self.to_sql(escaper)
    }
}

/// Render a sequence of nodes, each joined to the previous one by its joiner.
///
/// An empty sequence renders to an empty string; callers must then leave the
/// `WHERE` clause out entirely.
pub fn join_all(nodes: &[Where], escaper: &dyn Escaper) -> WhereResult<String> {
    let mut sql = String::new();
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            sql.push(' ');
            sql.push_str(node.joiner().sql_keyword());
            sql.push(' ');
        }
        sql.push_str(&node.to_sql(escaper)?);
    }
    tracing::trace!(
        dialect = escaper.name(),
        nodes = nodes.len(),
        sql = %sql,
        "rendered conditions"
    );
    Ok(sql)
}

impl ToSql for Condition {
    /// Several columns expand to `(c1 ... OR c2 ...)` whatever the node's joiner.
    fn to_sql(&self, escaper: &dyn Escaper) -> WhereResult<String> {
        let mut parts = self
            .columns()
            .iter()
            .map(|field| render_comparison(field, self.operator(), self.operand(), escaper))
            .collect::<WhereResult<Vec<_>>>()?;

        if parts.len() == 1 {
            Ok(parts.remove(0))
        } else {
            Ok(format!("({})", parts.join(" OR ")))
        }
    }
}

fn render_field(field: &Field, escaper: &dyn Escaper) -> WhereResult<String> {
    match field.cast {
        Some(kind) => escaper.cast_column(&field.name, kind),
        None => escaper.escape_column(&field.name),
    }
}

/// A literal, or another column when the value is a `field:` reference.
fn render_value(value: &Value, escaper: &dyn Escaper) -> WhereResult<String> {
    match value.field_reference() {
        Some(column) => render_field(&Field::parse(column), escaper),
        None => escaper.literal(value),
    }
}

fn render_comparison(
    field: &Field,
    op: Operator,
    operand: &Operand,
    escaper: &dyn Escaper,
) -> WhereResult<String> {
    let col = render_field(field, escaper)?;

    let sql = match (op, operand) {
        (op, _) if op.is_null_check() => format!("{} {}", col, op.sql_symbol()),
        (Operator::Between, Operand::Range(low, high)) => format!(
            "{} BETWEEN {} AND {}",
            col,
            render_value(low, escaper)?,
            render_value(high, escaper)?
        ),
        (Operator::In, Operand::Subquery(query)) => format!("{} IN ({})", col, query),
        (Operator::In, Operand::List(values)) => {
            let items = values
                .iter()
                .map(|v| render_value(v, escaper))
                .collect::<WhereResult<Vec<_>>>()?;
            format!("{} IN ({})", col, items.join(", "))
        }
        (Operator::Like, Operand::Scalar(value)) => {
            format!("LOWER({}) LIKE LOWER('{}')", col, like_pattern(value, escaper)?)
        }
        (
            Operator::Eq
            | Operator::Ne
            | Operator::Gt
            | Operator::Lt
            | Operator::Gte
            | Operator::Lte,
            Operand::Scalar(value),
        ) => format!("{} {} {}", col, op.sql_symbol(), render_value(value, escaper)?),
        (op, operand) => {
            return Err(WhereError::invalid(format!(
                "operand {:?} cannot be used with {}",
                operand, op
            )));
        }
    };
    Ok(sql)
}

/// A pattern without `%` becomes a contains-match; otherwise the caller's
/// wildcards are kept exactly where they are.
fn like_pattern(value: &Value, escaper: &dyn Escaper) -> WhereResult<String> {
    let raw = value.as_text();
    let escaped = escaper.escape_string(&raw)?;
    if raw.contains('%') {
        Ok(escaped)
    } else {
        Ok(format!("%{}%", escaped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transpiler::PostgresEscaper;

    /// Quotes predictably and escapes nothing.
    struct Fake;

    impl Escaper for Fake {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn escape_column(&self, name: &str) -> WhereResult<String> {
            Ok(format!("[{}]", name))
        }

        fn escape_string(&self, value: &str) -> WhereResult<String> {
            Ok(value.to_string())
        }

        fn cast_column(&self, name: &str, kind: CastKind) -> WhereResult<String> {
            Ok(format!("{}([{}])", kind, name))
        }
    }

    /// Refuses every identifier.
    struct Refusing;

    impl Escaper for Refusing {
        fn name(&self) -> &'static str {
            "refusing"
        }

        fn escape_column(&self, name: &str) -> WhereResult<String> {
            Err(WhereError::escape(format!("no columns allowed: {}", name)))
        }

        fn escape_string(&self, value: &str) -> WhereResult<String> {
            Ok(value.to_string())
        }

        fn cast_column(&self, name: &str, _kind: CastKind) -> WhereResult<String> {
            self.escape_column(name)
        }
    }

    #[test]
    fn test_plain_operators() {
        let cases = [
            (Where::eq("a", 1).unwrap(), "[a] = 1"),
            (Where::not_eq("a", "x").unwrap(), "[a] != 'x'"),
            (Where::gt("a", 2.5).unwrap(), "[a] > 2.5"),
            (Where::lt("a", true).unwrap(), "[a] < TRUE"),
            (Where::gte("a", Value::Null).unwrap(), "[a] >= NULL"),
            (Where::lte("a", -3).unwrap(), "[a] <= -3"),
        ];
        for (node, expected) in cases {
            assert_eq!(node.render(&Fake).unwrap(), expected);
        }
    }

    #[test]
    fn test_cast_both_sides() {
        let node = Where::lt("integer:stock", "field:decimal:minimo").unwrap();
        assert_eq!(node.render(&Fake).unwrap(), "integer([stock]) < decimal([minimo])");
    }

    #[test]
    fn test_field_reference_in_between_and_in() {
        let node = Where::between("precio", "field:min", 10).unwrap();
        assert_eq!(node.render(&Fake).unwrap(), "[precio] BETWEEN [min] AND 10");

        let node = Where::in_list("a", vec!["field:b", "c"]).unwrap();
        assert_eq!(node.render(&Fake).unwrap(), "[a] IN ([b], 'c')");
    }

    #[test]
    fn test_like_is_always_literal() {
        let node = Where::like("a", "field:b").unwrap();
        assert_eq!(node.render(&Fake).unwrap(), "LOWER([a]) LIKE LOWER('%field:b%')");
    }

    #[test]
    fn test_like_non_string_pattern() {
        let node = Where::like("codigo", 42).unwrap();
        assert_eq!(node.render(&Fake).unwrap(), "LOWER([codigo]) LIKE LOWER('%42%')");
    }

    #[test]
    fn test_multi_column_ignores_own_joiner() {
        let node = Where::or_like("nombre|integer:codigo", "ab").unwrap();
        assert_eq!(
            node.render(&Fake).unwrap(),
            "(LOWER([nombre]) LIKE LOWER('%ab%') OR LOWER(integer([codigo])) LIKE LOWER('%ab%'))"
        );

        let seq = vec![Where::eq("x", 1).unwrap(), Where::is_null("a|b").unwrap()];
        assert_eq!(
            join_all(&seq, &Fake).unwrap(),
            "[x] = 1 AND ([a] IS NULL OR [b] IS NULL)"
        );
    }

    #[test]
    fn test_multi_column_between_and_in() {
        let node = Where::between("a|b", 1, 2).unwrap();
        assert_eq!(
            node.render(&Fake).unwrap(),
            "([a] BETWEEN 1 AND 2 OR [b] BETWEEN 1 AND 2)"
        );

        let node = Where::in_list("a|b", "SELECT id FROM t").unwrap();
        assert_eq!(
            node.render(&Fake).unwrap(),
            "([a] IN (SELECT id FROM t) OR [b] IN (SELECT id FROM t))"
        );
    }

    #[test]
    fn test_nested_groups() {
        let seq = vec![
            Where::eq("a", 1).unwrap(),
            Where::or_sub(vec![
                Where::eq("b", 2).unwrap(),
                Where::sub(vec![
                    Where::eq("c", 3).unwrap(),
                    Where::or_eq("d", 4).unwrap(),
                ])
                .unwrap(),
            ])
            .unwrap(),
        ];
        assert_eq!(
            seq.to_sql(&Fake).unwrap(),
            "[a] = 1 OR ([b] = 2 AND ([c] = 3 OR [d] = 4))"
        );
    }

    #[test]
    fn test_first_joiner_suppressed() {
        let seq = vec![Where::or_eq("a", 1).unwrap()];
        assert_eq!(join_all(&seq, &Fake).unwrap(), "[a] = 1");
    }

    #[test]
    fn test_escaper_errors_propagate() {
        let err = Where::eq("a", 1).unwrap().render(&Refusing).unwrap_err();
        assert!(matches!(err, WhereError::Escape(_)));

        let seq = vec![Where::sub(vec![Where::is_null("a").unwrap()]).unwrap()];
        assert!(join_all(&seq, &Refusing).is_err());
    }

    #[test]
    fn test_postgres_escaping_in_like() {
        let node = Where::like("nombre", "O'Neil%").unwrap();
        assert_eq!(
            node.render(&PostgresEscaper).unwrap(),
            r#"LOWER("nombre") LIKE LOWER('O''Neil%')"#
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let seq = vec![
            Where::in_list("a", "x, y").unwrap(),
            Where::or_between("b", 1, 9).unwrap(),
        ];
        let first = join_all(&seq, &PostgresEscaper).unwrap();
        let second = join_all(&seq, &PostgresEscaper).unwrap();
        assert_eq!(first, second);
    }
}
