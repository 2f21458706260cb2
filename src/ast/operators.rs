use serde::{Deserialize, Serialize};

use crate::error::WhereError;

/// Comparison operator of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Lt,
    Gte,
    Lte,
    Between,
    In,
    Like,
    IsNull,
    IsNotNull,
}

impl Operator {
    /// Every supported operator, in reference order.
    pub const ALL: [Operator; 11] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Gt,
        Operator::Lt,
        Operator::Gte,
        Operator::Lte,
        Operator::Between,
        Operator::In,
        Operator::Like,
        Operator::IsNull,
        Operator::IsNotNull,
    ];

    /// SQL text of the operator.
    pub fn sql_symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Gte => ">=",
            Operator::Lte => "<=",
            Operator::Between => "BETWEEN",
            Operator::In => "IN",
            Operator::Like => "LIKE",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
        }
    }

    /// Whether the operator compares against no value at all.
    pub fn is_null_check(&self) -> bool {
        matches!(self, Operator::IsNull | Operator::IsNotNull)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sql_symbol())
    }
}

impl std::str::FromStr for Operator {
    type Err = WhereError;

    /// Keyword operators are matched case-insensitively and with collapsed inner whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        let op = match normalized.to_ascii_uppercase().as_str() {
            "=" => Operator::Eq,
            "!=" => Operator::Ne,
            ">" => Operator::Gt,
            "<" => Operator::Lt,
            ">=" => Operator::Gte,
            "<=" => Operator::Lte,
            "BETWEEN" => Operator::Between,
            "IN" => Operator::In,
            "LIKE" => Operator::Like,
            "IS NULL" => Operator::IsNull,
            "IS NOT NULL" => Operator::IsNotNull,
            _ => return Err(WhereError::invalid(format!("unknown operator '{}'", s))),
        };
        Ok(op)
    }
}

/// Boolean keyword connecting a node to the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Joiner {
    #[default]
    And,
    Or,
}

impl Joiner {
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            Joiner::And => "AND",
            Joiner::Or => "OR",
        }
    }
}

impl std::fmt::Display for Joiner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sql_keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_from_str() {
        assert_eq!("=".parse::<Operator>().unwrap(), Operator::Eq);
        assert_eq!("between".parse::<Operator>().unwrap(), Operator::Between);
        assert_eq!("is  not\tnull".parse::<Operator>().unwrap(), Operator::IsNotNull);
        assert!("<>".parse::<Operator>().is_err());
        assert!("~".parse::<Operator>().is_err());
    }

    #[test]
    fn test_symbols_parse_back() {
        for op in Operator::ALL {
            assert_eq!(op.sql_symbol().parse::<Operator>().unwrap(), op);
        }
    }

    #[test]
    fn test_null_checks() {
        let checks: Vec<Operator> = Operator::ALL
            .into_iter()
            .filter(Operator::is_null_check)
            .collect();
        assert_eq!(checks, vec![Operator::IsNull, Operator::IsNotNull]);
    }

    #[test]
    fn test_joiner_default_is_and() {
        assert_eq!(Joiner::default(), Joiner::And);
        assert_eq!(Joiner::Or.to_string(), "OR");
    }
}
