//! Application configuration loaded from a TOML file.
//!
//! ```toml
//! [database]
//! backend = "sqlite"
//! connection = "quotes.db"
//!
//! [logging]
//! level = "info"
//! file = "quote.log"
//!
//! [pricing]
//! enforce_width = false
//! ```
//!
//! Every section and key is optional. Command-line flags override the file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quote_core::calculations::WidthPolicy;
use quote_core::db::DbConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub database: DatabaseSection,
    pub logging: LoggingSection,
    pub pricing: PricingSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseSection {
    pub backend: String,

    /// Backend connection string. Without one, quotes are priced from the
    /// standard price table and cannot be submitted.
    pub connection: Option<String>,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            backend: DbConfig::default().backend,
            connection: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// A level or any `EnvFilter` directive. `RUST_LOG` takes precedence.
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingSection {
    /// Reject dakkapel widths outside the size class range.
    pub enforce_width: bool,
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file '{}'", path.display()))
    }

    /// Connection settings, or `None` when no database is configured.
    pub fn db_config(&self) -> Option<DbConfig> {
        self.database.connection.as_ref().map(|connection| DbConfig {
            backend: self.database.backend.clone(),
            connection_string: connection.clone(),
        })
    }

    pub fn width_policy(&self) -> WidthPolicy {
        if self.pricing.enforce_width {
            WidthPolicy::Enforce
        } else {
            WidthPolicy::Advisory
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.database.backend, "sqlite");
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.db_config(), None);
        assert_eq!(config.width_policy(), WidthPolicy::Advisory);
    }

    #[test]
    fn full_file_is_read() {
        let config = AppConfig::from_toml_str(
            r#"
            [database]
            backend = "sqlite"
            connection = "quotes.db"

            [logging]
            level = "debug"
            file = "quote.log"

            [pricing]
            enforce_width = true
            "#,
        )
        .unwrap();

        assert_eq!(
            config.db_config(),
            Some(DbConfig {
                backend: "sqlite".to_string(),
                connection_string: "quotes.db".to_string(),
            })
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("quote.log")));
        assert_eq!(config.width_policy(), WidthPolicy::Enforce);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = AppConfig::from_toml_str("[database]\nconnection = \":memory:\"\n").unwrap();

        assert_eq!(config.database.backend, "sqlite");
        assert_eq!(config.database.connection.as_deref(), Some(":memory:"));
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(AppConfig::from_toml_str("[database]\nurl = \"x\"\n").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::load(Path::new("/nonexistent/quote.toml")).unwrap_err();

        assert!(err.to_string().contains("/nonexistent/quote.toml"));
    }
}
