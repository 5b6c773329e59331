//! Error types for tabsql

use crate::compose::{Operator, StatementKind};
use crate::dialect::Dialect;
use thiserror::Error;

/// Result type alias for composer operations
pub type ComposeResult<T> = Result<T, ComposeError>;

/// Result type alias for execution, import and configuration
pub type TabResult<T> = Result<T, TabError>;

/// Errors raised while configuring or rendering a [`Composer`](crate::Composer).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// No renderer is registered for the composer's dialect
    #[error("Unsupported dialect: no renderer registered for {0}")]
    UnsupportedDialect(Dialect),

    /// `and`/`or` was called before any WHERE or HAVING chain was opened
    #[error("Ambiguous filter target: cannot append {operator} filter before where_() or having()")]
    AmbiguousFilterTarget { operator: Operator },

    /// Fragment template and arguments do not line up
    #[error("Format error in template '{template}': {message}")]
    FormatArgument { template: String, message: String },

    /// The dialect has no row-limiting syntax for this statement kind
    #[error("{dialect} cannot apply a row limit to a {kind} statement")]
    UnsupportedLimit { dialect: Dialect, kind: StatementKind },
}

impl ComposeError {
    /// Create a format error for `template`
    pub fn format(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FormatArgument {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Check if this is an unsupported dialect error
    pub fn is_unsupported_dialect(&self) -> bool {
        matches!(self, Self::UnsupportedDialect(_))
    }

    /// Check if this is an ambiguous filter target error
    pub fn is_ambiguous_filter_target(&self) -> bool {
        matches!(self, Self::AmbiguousFilterTarget { .. })
    }

    /// Check if this is a format argument error
    pub fn is_format_argument(&self) -> bool {
        matches!(self, Self::FormatArgument { .. })
    }
}

/// Error types for database and import operations
#[derive(Debug, Error)]
pub enum TabError {
    /// Statement composition failed
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Configuration could not be read or is invalid
    #[error("Config error: {0}")]
    Config(String),

    /// Row or column validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Column value could not be decoded
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },
}

impl TabError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is a composition error
    pub fn is_compose(&self) -> bool {
        matches!(self, Self::Compose(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<toml::de::Error> for TabError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
