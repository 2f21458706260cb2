//! Serializable form of condition nodes.
//!
//! `Where` (de)serializes through [`WhereDocument`], so a document loaded from
//! JSON is validated by the same constructors as hand-built nodes.

use serde::{Deserialize, Serialize};

use crate::ast::{Joiner, Operand, Value, Where, WhereKind};
use crate::error::WhereError;

/// A scalar or a list, as written in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentValue {
    List(Vec<Value>),
    Scalar(Value),
}

/// Plain-data shape of a [`Where`] node.
///
/// ```json
/// {"fields": "total", "operator": ">=", "value": 100, "joiner": "OR"}
/// {"fields": "id", "operator": "IN", "subquery": "WITH x AS (...) SELECT id FROM x"}
/// {"joiner": "AND", "group": [ ... ]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WhereDocument {
    Group {
        #[serde(default)]
        joiner: Joiner,
        group: Vec<WhereDocument>,
    },
    Condition {
        fields: String,
        #[serde(default = "default_operator")]
        operator: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<DocumentValue>,
        /// Verbatim SQL for `IN (<subquery>)`, never re-detected from `value`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subquery: Option<String>,
        #[serde(default)]
        joiner: Joiner,
    },
}

fn default_operator() -> String {
    "=".to_string()
}

impl TryFrom<WhereDocument> for Where {
    type Error = WhereError;

    fn try_from(doc: WhereDocument) -> Result<Self, Self::Error> {
        match doc {
            WhereDocument::Group { joiner, group } => {
                let nodes = group
                    .into_iter()
                    .map(Where::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Where::sub_with(nodes, joiner)
            }
            WhereDocument::Condition {
                fields,
                operator,
                value,
                subquery,
                joiner,
            } => {
                let operand = match (value, subquery) {
                    (Some(_), Some(_)) => {
                        return Err(WhereError::invalid(format!(
                            "condition on '{}' has both a value and a subquery",
                            fields
                        )));
                    }
                    (None, Some(query)) => Operand::Subquery(query),
                    (None, None) => Operand::None,
                    (Some(DocumentValue::Scalar(v)), None) => Operand::Scalar(v),
                    (Some(DocumentValue::List(vs)), None) => Operand::List(vs),
                };
                Where::with_operator(&fields, operand, &operator, joiner)
            }
        }
    }
}

impl From<Where> for WhereDocument {
    fn from(node: Where) -> Self {
        let joiner = node.joiner();
        match node.kind().clone() {
            WhereKind::Group(nodes) => WhereDocument::Group {
                joiner,
                group: nodes.into_iter().map(WhereDocument::from).collect(),
            },
            WhereKind::Condition(cond) => {
                let (value, subquery) = match cond.operand().clone() {
                    Operand::None => (None, None),
                    Operand::Scalar(v) => (Some(DocumentValue::Scalar(v)), None),
                    Operand::Range(low, high) => (Some(DocumentValue::List(vec![low, high])), None),
                    Operand::List(vs) => (Some(DocumentValue::List(vs)), None),
                    Operand::Subquery(q) => (None, Some(q)),
                };
                WhereDocument::Condition {
                    fields: cond.fields().to_string(),
                    operator: cond.operator().sql_symbol().to_string(),
                    value,
                    subquery,
                    joiner,
                }
            }
        }
    }
}

/// Load a sequence of nodes from a JSON array.
pub fn from_json(json: &str) -> crate::error::WhereResult<Vec<Where>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Operator;

    #[test]
    fn test_load_document() {
        let nodes = from_json(
            r#"[
                {"fields": "nombre", "value": "test"},
                {"fields": "total", "operator": "<=", "value": 100, "joiner": "OR"},
                {"joiner": "AND", "group": [
                    {
                        "fields": "fecha",
                        "operator": "BETWEEN",
                        "value": ["2020-01-01", "2020-01-31"]
                    }
                ]}
            ]"#,
        )
        .unwrap();

        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].condition().unwrap().operator(), Operator::Eq);
        assert_eq!(nodes[1].joiner(), Joiner::Or);
        match nodes[2].kind() {
            WhereKind::Group(inner) => {
                assert_eq!(
                    inner[0].condition().unwrap().operand(),
                    &Operand::Range(Value::from("2020-01-01"), Value::from("2020-01-31"))
                );
            }
            other => panic!("expected group, got {:?}", other),
        }
    }

    #[test]
    fn test_document_validation_runs() {
        let err = from_json(r#"[{"fields": "x", "operator": "BETWEEN", "value": [1]}]"#);
        assert!(err.is_err());

        let err = from_json(r#"[{"fields": "x", "operator": "~", "value": 1}]"#);
        assert!(err.is_err());

        let err = from_json(r#"[{"group": []}]"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_subquery_round_trip() {
        let query = "WITH x AS (SELECT 1) SELECT * FROM x";
        let node = Where::in_list("a", Operand::Subquery(query.to_string())).unwrap();

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"fields": "a", "operator": "IN", "subquery": query, "joiner": "AND"})
        );

        let reloaded: Where = serde_json::from_value(json).unwrap();
        assert_eq!(reloaded, node);
        assert_eq!(
            reloaded.condition().unwrap().operand(),
            &Operand::Subquery(query.to_string())
        );
    }

    #[test]
    fn test_subquery_and_value_conflict() {
        let err = from_json(
            r#"[{"fields": "a", "operator": "IN", "value": [1], "subquery": "SELECT 1"}]"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_serialize_node() {
        let node = Where::or_is_null("nick").unwrap();
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"fields": "nick", "operator": "IS NULL", "joiner": "OR"})
        );
    }
}
