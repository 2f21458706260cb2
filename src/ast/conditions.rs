use serde::{Deserialize, Serialize};

use crate::ast::{Field, Joiner, Operand, Operator, Value, WhereDocument, split_fields};
use crate::error::{WhereError, WhereResult};

/// A single comparison: one or more columns, an operator and a resolved operand.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    fields: String,
    columns: Vec<Field>,
    operator: Operator,
    operand: Operand,
}

impl Condition {
    /// The field list as given, e.g. `"col1|integer:col2"`.
    pub fn fields(&self) -> &str {
        &self.fields
    }

    /// Resolved columns, one per `|`-separated identifier.
    pub fn columns(&self) -> &[Field] {
        &self.columns
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operand(&self) -> &Operand {
        &self.operand
    }
}

/// What a node holds.
#[derive(Debug, Clone, PartialEq)]
pub enum WhereKind {
    Condition(Condition),
    /// Parenthesized sub-sequence, never empty.
    Group(Vec<Where>),
}

/// An immutable node of a WHERE expression.
///
/// Nodes are created through the factory functions below and rendered with
/// [`Where::render`] or, as a sequence, with [`crate::join_all`].
///
/// ```
/// use wherekit::prelude::*;
///
/// let nodes = vec![
///     Where::sub(vec![
///         Where::eq("nombre", "test2")?,
///         Where::or_eq("nombre", "test3")?,
///     ])?,
///     Where::gte("total", 100)?,
/// ];
/// let sql = join_all(&nodes, &PostgresEscaper)?;
/// assert_eq!(sql, r#"("nombre" = 'test2' OR "nombre" = 'test3') AND "total" >= 100"#);
/// # Ok::<(), WhereError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WhereDocument", into = "WhereDocument")]
pub struct Where {
    joiner: Joiner,
    kind: WhereKind,
}

macro_rules! named_constructors {
    ($($(#[$doc:meta])* $and:ident, $or:ident => $op:expr;)*) => {
        $(
            $(#[$doc])*
            pub fn $and(fields: &str, value: impl Into<Operand>) -> WhereResult<Self> {
                Self::build(fields, $op, value, Joiner::And)
            }

            $(#[$doc])*
            ///
            /// Joined to the previous node with `OR`.
            pub fn $or(fields: &str, value: impl Into<Operand>) -> WhereResult<Self> {
                Self::build(fields, $op, value, Joiner::Or)
            }
        )*
    };
}

impl Where {
    /// Equality condition joined with `AND`.
    pub fn new(fields: &str, value: impl Into<Operand>) -> WhereResult<Self> {
        Self::build(fields, Operator::Eq, value, Joiner::And)
    }

    /// Generic constructor taking the operator as text (`"="`, `"between"`, `"is not null"`...).
    pub fn with_operator(
        fields: &str,
        value: impl Into<Operand>,
        operator: &str,
        joiner: Joiner,
    ) -> WhereResult<Self> {
        let operator: Operator = operator.parse()?;
        Self::build(fields, operator, value, joiner)
    }

    /// Typed generic constructor. Validates the fields and normalizes the operand.
    pub fn build(
        fields: &str,
        operator: Operator,
        value: impl Into<Operand>,
        joiner: Joiner,
    ) -> WhereResult<Self> {
        let columns = split_fields(fields)?;
        let operand = resolve_operand(operator, value.into())?;
        Ok(Self {
            joiner,
            kind: WhereKind::Condition(Condition {
                fields: fields.to_string(),
                columns,
                operator,
                operand,
            }),
        })
    }

    named_constructors! {
        /// `fields = value`.
        column, or_column => Operator::Eq;
        /// `fields = value`.
        eq, or_eq => Operator::Eq;
        /// `fields != value`.
        not_eq, or_not_eq => Operator::Ne;
        /// `fields > value`.
        gt, or_gt => Operator::Gt;
        /// `fields >= value`.
        gte, or_gte => Operator::Gte;
        /// `fields < value`.
        lt, or_lt => Operator::Lt;
        /// `fields <= value`.
        lte, or_lte => Operator::Lte;
        /// `fields IN (...)`. Accepts a list, a comma separated string or a `SELECT` subquery.
        in_list, or_in_list => Operator::In;
        /// Case-insensitive `LIKE`; a pattern without `%` matches anywhere.
        like, or_like => Operator::Like;
    }

    /// `fields BETWEEN low AND high`.
    pub fn between(
        fields: &str,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> WhereResult<Self> {
        Self::build(fields, Operator::Between, (low, high), Joiner::And)
    }

    /// `fields BETWEEN low AND high`, joined with `OR`.
    pub fn or_between(
        fields: &str,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> WhereResult<Self> {
        Self::build(fields, Operator::Between, (low, high), Joiner::Or)
    }

    pub fn is_null(fields: &str) -> WhereResult<Self> {
        Self::build(fields, Operator::IsNull, Operand::None, Joiner::And)
    }

    pub fn or_is_null(fields: &str) -> WhereResult<Self> {
        Self::build(fields, Operator::IsNull, Operand::None, Joiner::Or)
    }

    pub fn is_not_null(fields: &str) -> WhereResult<Self> {
        Self::build(fields, Operator::IsNotNull, Operand::None, Joiner::And)
    }

    pub fn or_is_not_null(fields: &str) -> WhereResult<Self> {
        Self::build(fields, Operator::IsNotNull, Operand::None, Joiner::Or)
    }

    /// Parenthesized group joined with `AND`.
    pub fn sub(nodes: Vec<Where>) -> WhereResult<Self> {
        Self::sub_with(nodes, Joiner::And)
    }

    /// Parenthesized group joined with `OR`.
    pub fn or_sub(nodes: Vec<Where>) -> WhereResult<Self> {
        Self::sub_with(nodes, Joiner::Or)
    }

    pub fn sub_with(nodes: Vec<Where>, joiner: Joiner) -> WhereResult<Self> {
        if nodes.is_empty() {
            return Err(WhereError::invalid("sub-group must contain at least one node"));
        }
        Ok(Self {
            joiner,
            kind: WhereKind::Group(nodes),
        })
    }

    pub fn joiner(&self) -> Joiner {
        self.joiner
    }

    pub fn kind(&self) -> &WhereKind {
        &self.kind
    }

    /// The condition, unless this node is a group.
    pub fn condition(&self) -> Option<&Condition> {
        match &self.kind {
            WhereKind::Condition(cond) => Some(cond),
            WhereKind::Group(_) => None,
        }
    }
}

/// Normalize a caller-supplied operand into the shape the operator renders.
fn resolve_operand(operator: Operator, operand: Operand) -> WhereResult<Operand> {
    match operator {
        op if op.is_null_check() => Ok(Operand::None),
        Operator::Between => match operand {
            Operand::Range(low, high) => Ok(Operand::Range(low, high)),
            Operand::List(values) if values.len() == 2 => {
                let mut values = values.into_iter();
                match (values.next(), values.next()) {
                    (Some(low), Some(high)) => Ok(Operand::Range(low, high)),
                    _ => Err(WhereError::invalid("BETWEEN needs exactly two bounds")),
                }
            }
            Operand::List(values) => Err(WhereError::invalid(format!(
                "BETWEEN needs exactly two bounds, got {}",
                values.len()
            ))),
            _ => Err(WhereError::invalid("BETWEEN needs exactly two bounds")),
        },
        Operator::In => resolve_in(operand),
        Operator::Like => match operand {
            Operand::Scalar(Value::Null) | Operand::None => {
                Err(WhereError::invalid("LIKE needs a pattern"))
            }
            Operand::Scalar(value) => Ok(Operand::Scalar(value)),
            _ => Err(WhereError::invalid("LIKE needs a single pattern")),
        },
        _ => match operand {
            Operand::None => Ok(Operand::Scalar(Value::Null)),
            Operand::Scalar(value) => Ok(Operand::Scalar(value)),
            _ => Err(WhereError::invalid(format!(
                "operator {} needs a single value",
                operator
            ))),
        },
    }
}

fn resolve_in(operand: Operand) -> WhereResult<Operand> {
    match operand {
        Operand::List(values) if values.is_empty() => {
            Err(WhereError::invalid("IN needs at least one value"))
        }
        Operand::List(values) => Ok(Operand::List(values)),
        Operand::Range(low, high) => Ok(Operand::List(vec![low, high])),
        Operand::Subquery(query) if query.trim().is_empty() => {
            Err(WhereError::invalid("IN subquery must not be empty"))
        }
        Operand::Subquery(query) => Ok(Operand::Subquery(query)),
        Operand::Scalar(Value::String(text)) => {
            if text.trim().is_empty() {
                return Err(WhereError::invalid("IN needs at least one value"));
            }
            if is_subquery(&text) {
                return Ok(Operand::Subquery(text));
            }
            Ok(Operand::List(
                text.split(',')
                    .map(|token| Value::String(token.trim().to_string()))
                    .collect(),
            ))
        }
        Operand::Scalar(Value::Null) | Operand::None => {
            Err(WhereError::invalid("IN needs at least one value"))
        }
        Operand::Scalar(value) => Ok(Operand::List(vec![value])),
    }
}

/// `SELECT` keyword (any case) followed by whitespace, after leading whitespace.
pub(crate) fn is_subquery(text: &str) -> bool {
    let text = text.trim_start();
    let Some(keyword) = text.get(..6) else {
        return false;
    };
    keyword.eq_ignore_ascii_case("select") && text[6..].starts_with(char::is_whitespace)
}
