use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Prefix marking a string value as a reference to another column.
pub const FIELD_PREFIX: &str = "field:";

/// A scalar value in a condition.
///
/// Serialized untagged so condition documents can use plain JSON scalars. Dates
/// serialize as strings and come back as [`Value::String`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Value {
    /// Column named by a `field:` value, if this is one.
    pub fn field_reference(&self) -> Option<&str> {
        match self {
            Value::String(s) => s.strip_prefix(FIELD_PREFIX),
            _ => None,
        }
    }

    /// Raw text of the value, without any SQL quoting.
    pub fn as_text(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

/// The right-hand side of a condition, as supplied by the caller.
///
/// Constructors normalize it per operator: `In` keeps `List` or `Subquery`,
/// `Between` keeps `Range`, null checks keep `None`, everything else `Scalar`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Operand {
    #[default]
    None,
    Scalar(Value),
    Range(Value, Value),
    List(Vec<Value>),
    Subquery(String),
}

macro_rules! scalar_operand {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Operand {
                fn from(v: $t) -> Self {
                    Operand::Scalar(v.into())
                }
            }
        )*
    };
}

scalar_operand!(Value, bool, i32, i64, u32, f64, &str, String, NaiveDate, NaiveDateTime);

impl<T: Into<Value>> From<Vec<T>> for Operand {
    fn from(values: Vec<T>) -> Self {
        Operand::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Operand {
    fn from(values: &[T]) -> Self {
        Operand::List(values.iter().cloned().map(Into::into).collect())
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Operand {
    fn from((low, high): (A, B)) -> Self {
        Operand::Range(low.into(), high.into())
    }
}
