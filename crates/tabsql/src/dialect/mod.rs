//! SQL dialects and their rendering strategies.
//!
//! Each dialect with rendering support has a [`Renderer`]. The trait's default
//! methods assemble the common clause layout; implementations only override
//! the parts their dialect spells differently (row limits, identifier quoting,
//! literals). Adding a dialect means adding a renderer, not touching
//! [`Composer`].

mod limit_offset;
mod sqlserver;

pub use limit_offset::LimitOffsetRenderer;
pub use sqlserver::SqlServerRenderer;

use crate::compose::{Clause, Composer, Statement, StatementKind, render_chain};
use crate::error::{ComposeResult, TabError};
use crate::row::Value;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A SQL dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    SqlServer,
    Postgres,
    Sqlite,
    /// Recognised, but no renderer ships for it yet.
    Oracle,
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [
        Dialect::SqlServer,
        Dialect::Postgres,
        Dialect::Sqlite,
        Dialect::Oracle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Dialect::SqlServer => "SQL Server",
            Dialect::Postgres => "PostgreSQL",
            Dialect::Sqlite => "SQLite",
            Dialect::Oracle => "Oracle",
        }
    }

    /// Whether a built-in renderer exists for this dialect.
    pub fn is_supported(self) -> bool {
        renderer_for(self).is_some()
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = TabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlserver" | "sql_server" | "mssql" | "tsql" => Ok(Dialect::SqlServer),
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            "oracle" => Ok(Dialect::Oracle),
            other => Err(TabError::config(format!("unknown dialect '{other}'"))),
        }
    }
}

/// The built-in renderer for `dialect`, if one exists.
pub fn renderer_for(dialect: Dialect) -> Option<Arc<dyn Renderer>> {
    match dialect {
        Dialect::SqlServer => Some(Arc::new(SqlServerRenderer)),
        Dialect::Postgres | Dialect::Sqlite => Some(Arc::new(LimitOffsetRenderer::new(dialect))),
        Dialect::Oracle => None,
    }
}

/// Per-dialect rendering strategy.
pub trait Renderer: fmt::Debug + Send + Sync {
    /// Dialect this renderer produces.
    fn dialect(&self) -> Dialect;

    /// Row-limit token placed directly after the statement keyword,
    /// including its trailing space.
    fn limit_prefix(&self, kind: StatementKind, rows: u64) -> ComposeResult<Option<String>> {
        let _ = (kind, rows);
        Ok(None)
    }

    /// Row-limit line placed after every other clause.
    fn limit_suffix(&self, kind: StatementKind, rows: u64) -> ComposeResult<Option<String>> {
        let _ = (kind, rows);
        Ok(None)
    }

    /// Quote a single identifier part. Dots are kept as part of the name.
    fn quote_part(&self, part: &str) -> String {
        format!("\"{}\"", part.replace('"', "\"\""))
    }

    /// Quote a possibly dotted identifier (`schema.table`).
    fn quote_ident(&self, ident: &str) -> String {
        ident
            .split('.')
            .map(|part| self.quote_part(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Format a value as a SQL literal.
    fn literal(&self, value: &Value) -> String {
        ansi_literal(value)
    }

    /// Render the composer's full statement.
    fn render(&self, composer: &Composer) -> ComposeResult<String> {
        render_statement(self, composer)
    }
}

/// Quote `s` as a string literal, doubling embedded single quotes.
pub fn quote_str(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// ANSI literal formatting: `TRUE`/`FALSE`, `'..'` strings, ISO dates.
pub fn ansi_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => String::from(if *b { "TRUE" } else { "FALSE" }),
        Value::Int(i) => i.to_string(),
        Value::Float(f) if f.is_finite() => f.to_string(),
        Value::Float(f) => format!("'{f}'"),
        Value::Text(s) => quote_str(s),
        Value::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
        Value::Timestamp(ts) => format!("'{}'", ts.format("%Y-%m-%d %H:%M:%S%.f")),
        Value::Uuid(u) => format!("'{u}'"),
    }
}

/// Shared clause layout used by the default [`Renderer::render`].
///
/// Lines are joined with `\n`: statement head, `WHERE` chain, `GROUP BY`,
/// `HAVING` chain, `ORDER BY`, then any limit suffix.
pub fn render_statement<R: Renderer + ?Sized>(
    renderer: &R,
    composer: &Composer,
) -> ComposeResult<String> {
    let kind = composer.kind();
    let (prefix, suffix) = match composer.limit_value() {
        Some(rows) => (
            renderer.limit_prefix(kind, rows)?.unwrap_or_default(),
            renderer.limit_suffix(kind, rows)?,
        ),
        None => (String::new(), None),
    };

    let mut lines: Vec<String> = Vec::new();
    match composer.statement() {
        Statement::None => {}
        Statement::Select { columns } => {
            lines.push(head("SELECT", &prefix, columns));
            if let Some(from) = composer.from_fragment() {
                lines.push(format!("FROM {from}"));
            }
        }
        Statement::Delete { target } => lines.push(head("DELETE", &prefix, target)),
        Statement::Update { table } => {
            lines.push(head("UPDATE", &prefix, table));
            let sets = composer.set_fragments();
            if !sets.is_empty() {
                lines.push("SET".to_string());
                lines.push(sets.join(",\n"));
            }
        }
        Statement::Insert { into } => {
            lines.push(head("INSERT INTO", "", into));
            if let Some(values) = composer.values_fragment() {
                lines.push(format!("VALUES ({values})"));
            }
        }
    }

    if let Some(chain) = render_chain(composer.filters_for(Clause::Where)) {
        lines.push(Clause::Where.keyword().to_string());
        lines.push(chain);
    }
    if let Some(group_by) = composer.group_by_fragment() {
        lines.push(format!("GROUP BY {group_by}"));
    }
    if let Some(chain) = render_chain(composer.filters_for(Clause::Having)) {
        lines.push(Clause::Having.keyword().to_string());
        lines.push(chain);
    }
    if let Some(order_by) = composer.order_by_fragment() {
        lines.push(format!("ORDER BY {order_by}"));
    }
    if let Some(suffix) = suffix {
        lines.push(suffix);
    }

    Ok(lines.join("\n"))
}

fn head(keyword: &str, prefix: &str, fragment: &str) -> String {
    let line = format!("{keyword} {prefix}{fragment}");
    if fragment.is_empty() {
        line.trim_end().to_string()
    } else {
        line
    }
}

#[cfg(test)]
mod tests;
