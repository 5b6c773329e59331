use super::{Dialect, Renderer, ansi_literal, quote_str};
use crate::compose::StatementKind;
use crate::error::ComposeResult;
use crate::row::Value;
use chrono::Timelike;

/// T-SQL renderer.
///
/// Row limits use `TOP`: `SELECT TOP 10 ...`, and the parenthesised form
/// `DELETE TOP (10) ...` / `UPDATE TOP (10) ...` that DML requires.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerRenderer;

impl Renderer for SqlServerRenderer {
    fn dialect(&self) -> Dialect {
        Dialect::SqlServer
    }

    fn limit_prefix(&self, kind: StatementKind, rows: u64) -> ComposeResult<Option<String>> {
        Ok(match kind {
            StatementKind::Select => Some(format!("TOP {rows} ")),
            StatementKind::Delete | StatementKind::Update => Some(format!("TOP ({rows}) ")),
            StatementKind::Insert | StatementKind::None => None,
        })
    }

    fn quote_part(&self, part: &str) -> String {
        format!("[{}]", part.replace(']', "]]"))
    }

    fn literal(&self, value: &Value) -> String {
        match value {
            Value::Bool(b) => String::from(if *b { "1" } else { "0" }),
            Value::Text(s) => format!("N{}", quote_str(s)),
            // datetime2 keeps at most 7 fractional digits (100ns ticks).
            Value::Timestamp(ts) => {
                let base = ts.format("%Y-%m-%d %H:%M:%S");
                match ts.nanosecond() % 1_000_000_000 / 100 {
                    0 => format!("'{base}'"),
                    ticks => format!("'{base}.{ticks:07}'"),
                }
            }
            other => ansi_literal(other),
        }
    }
}
