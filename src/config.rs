//! CLI configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{WhereError, WhereResult};
use crate::transpiler::Dialect;

/// File name looked up in the working directory.
pub const LOCAL_CONFIG: &str = "wherekit.toml";

/// Settings read from `wherekit.toml`.
///
/// ```toml
/// dialect = "mysql"
/// color = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dialect used when none is given on the command line
    pub dialect: Dialect,

    /// Colored terminal output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dialect: Dialect::Postgres,
            color: true,
        }
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> WhereResult<Self> {
        toml::from_str(content).map_err(|e| WhereError::Config(e.to_string()))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise `./wherekit.toml`, then
    /// `<config dir>/wherekit/config.toml`, then built-in defaults.
    pub fn load(explicit: Option<&Path>) -> WhereResult<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(WhereError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_file(path);
        }

        match Self::discover() {
            Some(path) => Self::load_file(&path),
            None => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn load_file(path: &Path) -> WhereResult<Self> {
        tracing::debug!(path = %path.display(), "loading config");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// First existing config file in lookup order.
    pub fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.exists() {
            return Some(local);
        }

        dirs::config_dir()
            .map(|dir| dir.join("wherekit").join("config.toml"))
            .filter(|path| path.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml() {
        let config = Config::from_toml("dialect = \"sqlite\"\ncolor = false\n").unwrap();
        assert_eq!(config.dialect, Dialect::Sqlite);
        assert!(!config.color);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml("color = false").unwrap();
        assert_eq!(config.dialect, Dialect::Postgres);
    }

    #[test]
    fn test_bad_dialect() {
        let err = Config::from_toml("dialect = \"oracle\"").unwrap_err();
        assert!(matches!(err, WhereError::Config(_)));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/wherekit.toml"))).unwrap_err();
        assert!(matches!(err, WhereError::Config(_)));
    }
}
