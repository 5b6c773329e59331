use super::{Dialect, Renderer};
use crate::compose::StatementKind;
use crate::error::{ComposeError, ComposeResult};

/// Renderer for dialects that limit rows with a trailing `LIMIT n`
/// (PostgreSQL, SQLite).
///
/// Neither dialect accepts `LIMIT` on DELETE or UPDATE in a stock build, so a
/// limit on those statements is rejected rather than silently dropped.
#[derive(Debug, Clone, Copy)]
pub struct LimitOffsetRenderer {
    dialect: Dialect,
}

impl LimitOffsetRenderer {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }
}

impl Renderer for LimitOffsetRenderer {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn limit_suffix(&self, kind: StatementKind, rows: u64) -> ComposeResult<Option<String>> {
        match kind {
            StatementKind::Select => Ok(Some(format!("LIMIT {rows}"))),
            StatementKind::Delete | StatementKind::Update => Err(ComposeError::UnsupportedLimit {
                dialect: self.dialect,
                kind,
            }),
            StatementKind::Insert | StatementKind::None => Ok(None),
        }
    }
}
