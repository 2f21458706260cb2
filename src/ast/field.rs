use serde::{Deserialize, Serialize};

use crate::error::{WhereError, WhereResult};

/// Separator between alternative columns in a field list (`"col1|col2"`).
pub const FIELD_SEPARATOR: char = '|';

/// Scalar type a column can be cast to before comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastKind {
    Integer,
    Decimal,
    Text,
    Date,
    Timestamp,
}

impl CastKind {
    /// Field-name prefix selecting this cast, without the trailing colon.
    pub fn prefix(&self) -> &'static str {
        match self {
            CastKind::Integer => "integer",
            CastKind::Decimal => "decimal",
            CastKind::Text => "text",
            CastKind::Date => "date",
            CastKind::Timestamp => "timestamp",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "integer" => Some(CastKind::Integer),
            "decimal" => Some(CastKind::Decimal),
            "text" => Some(CastKind::Text),
            "date" => Some(CastKind::Date),
            "timestamp" => Some(CastKind::Timestamp),
            _ => None,
        }
    }
}

impl std::fmt::Display for CastKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// One column reference, optionally cast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub cast: Option<CastKind>,
}

impl Field {
    /// Resolve a single identifier such as `codigo` or `integer:codigo`.
    ///
    /// An unrecognized prefix is not an error: `foo:bar` is taken as the literal
    /// column name, since real column data may contain colons.
    pub fn parse(ident: &str) -> Self {
        if let Some((prefix, name)) = ident.split_once(':') {
            if let Some(cast) = CastKind::from_prefix(prefix) {
                return Field {
                    name: name.to_string(),
                    cast: Some(cast),
                };
            }
            tracing::debug!(field = ident, "unknown cast prefix, using plain column");
        }
        Field {
            name: ident.to_string(),
            cast: None,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.cast {
            Some(cast) => write!(f, "{}:{}", cast, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Split a field list on [`FIELD_SEPARATOR`] and resolve each identifier.
pub fn split_fields(fields: &str) -> WhereResult<Vec<Field>> {
    if fields.trim().is_empty() {
        return Err(WhereError::invalid("fields must not be empty"));
    }

    fields
        .split(FIELD_SEPARATOR)
        .map(|ident| {
            let ident = ident.trim();
            if ident.is_empty() {
                return Err(WhereError::invalid(format!(
                    "empty column in field list '{}'",
                    fields
                )));
            }
            let field = Field::parse(ident);
            if field.name.is_empty() {
                return Err(WhereError::invalid(format!(
                    "missing column name after cast prefix in '{}'",
                    ident
                )));
            }
            Ok(field)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_field() {
        let field = Field::parse("codigo");
        assert_eq!(field.name, "codigo");
        assert_eq!(field.cast, None);
    }

    #[test]
    fn test_cast_prefix() {
        let field = Field::parse("integer:codigo");
        assert_eq!(field.name, "codigo");
        assert_eq!(field.cast, Some(CastKind::Integer));
        assert_eq!(field.to_string(), "integer:codigo");
    }

    #[test]
    fn test_unknown_prefix_is_column_name() {
        let field = Field::parse("weird:column");
        assert_eq!(field.name, "weird:column");
        assert_eq!(field.cast, None);
    }

    #[test]
    fn test_split_multi() {
        let fields = split_fields("col1|date:col2| col3").unwrap();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[1].cast, Some(CastKind::Date));
        assert_eq!(fields[2].name, "col3");
    }

    #[test]
    fn test_split_rejects_empty() {
        assert!(split_fields("").is_err());
        assert!(split_fields("a||b").is_err());
        assert!(split_fields("integer:").is_err());
    }
}
