//! Import configuration.
//!
//! ```toml
//! dialect = "postgres"
//! table = "public.people"
//! batch_size = 200
//!
//! [column_map]
//! "Full Name" = "full_name"
//! ```

use crate::dialect::Dialect;
use crate::error::{TabError, TabResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_BATCH_SIZE: usize = 500;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportConfig {
    pub dialect: Dialect,
    /// Target table, optionally schema-qualified.
    pub table: String,
    /// Statements handed to the executor per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_true")]
    pub quote_identifiers: bool,
    /// Source column name -> target column name.
    #[serde(default)]
    pub column_map: BTreeMap<String, String>,
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_true() -> bool {
    true
}

impl ImportConfig {
    pub fn new(dialect: Dialect, table: impl Into<String>) -> Self {
        Self {
            dialect,
            table: table.into(),
            batch_size: DEFAULT_BATCH_SIZE,
            quote_identifiers: true,
            column_map: BTreeMap::new(),
        }
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn quote_identifiers(mut self, quote: bool) -> Self {
        self.quote_identifiers = quote;
        self
    }

    /// Rename a source column on its way into the table.
    pub fn map_column(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.column_map.insert(source.into(), target.into());
        self
    }

    /// Target column name for a source column.
    pub fn target_column<'a>(&'a self, source: &'a str) -> &'a str {
        self.column_map.get(source).map_or(source, String::as_str)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> TabResult<Self> {
        let config: ImportConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> TabResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            TabError::config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw).map_err(|e| match e {
            TabError::Config(msg) => {
                TabError::config(format!("failed to parse config file {}: {msg}", path.display()))
            }
            other => other,
        })
    }

    pub fn validate(&self) -> TabResult<()> {
        if self.table.trim().is_empty() {
            return Err(TabError::config("table must not be empty"));
        }
        if self.batch_size == 0 {
            return Err(TabError::config("batch_size must be greater than 0"));
        }
        if !self.dialect.is_supported() {
            return Err(TabError::config(format!(
                "dialect {} has no renderer",
                self.dialect
            )));
        }
        if let Some((source, _)) = self.column_map.iter().find(|(_, t)| t.trim().is_empty()) {
            return Err(TabError::config(format!(
                "column_map entry for '{source}' has an empty target"
            )));
        }
        Ok(())
    }
}
