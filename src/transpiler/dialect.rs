use serde::{Deserialize, Serialize};

use crate::error::WhereError;
use crate::transpiler::sql::mysql::MySqlEscaper;
use crate::transpiler::sql::postgres::PostgresEscaper;
use crate::transpiler::sql::sqlite::SqliteEscaper;
use crate::transpiler::traits::Escaper;

/// Supported SQL Dialects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Postgres,
    MySql,
    Sqlite,
}

impl Dialect {
    pub fn escaper(&self) -> Box<dyn Escaper> {
        match self {
            Dialect::Postgres => Box::new(PostgresEscaper),
            Dialect::MySql => Box::new(MySqlEscaper),
            Dialect::Sqlite => Box::new(SqliteEscaper),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Postgres => write!(f, "postgres"),
            Dialect::MySql => write!(f, "mysql"),
            Dialect::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = WhereError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            other => Err(WhereError::Config(format!(
                "unknown dialect '{}'. Expected: postgres, mysql or sqlite",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("PG".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert_eq!("mariadb".parse::<Dialect>().unwrap(), Dialect::MySql);
        assert!("oracle".parse::<Dialect>().is_err());
    }

    #[test]
    fn test_escaper_names() {
        assert_eq!(Dialect::Postgres.escaper().name(), "PostgreSQL");
        assert_eq!(Dialect::MySql.escaper().name(), "MySQL");
        assert_eq!(Dialect::Sqlite.escaper().name(), "SQLite");
    }
}
