//! Row export: runs a SELECT composer and streams decoded rows into a sink.

use crate::client::Executor;
use crate::compose::{Composer, StatementKind};
use crate::error::{TabError, TabResult};
use crate::row::{decode_pg_row, pg_columns};
use crate::table::RowSink;

/// Run `query` through `conn` and write every result row to `sink`.
///
/// Column metadata comes from the first result row, so an empty result calls
/// [`RowSink::begin`] with no columns. Returns the number of rows written.
pub async fn export<E, K>(conn: &E, query: &Composer, sink: &mut K) -> TabResult<usize>
where
    E: Executor,
    K: RowSink + ?Sized,
{
    if query.kind() != StatementKind::Select {
        return Err(TabError::validation(format!(
            "export needs a SELECT statement, got {}",
            query.kind()
        )));
    }

    let rows = conn.query_composed(query).await?;
    let columns = match rows.first() {
        Some(first) => pg_columns(first)?,
        None => Vec::new(),
    };

    sink.begin(&columns)?;
    for row in &rows {
        sink.write_row(&decode_pg_row(row)?)?;
    }
    sink.finish()?;

    tracing::info!(target: "tabsql.export", rows = rows.len(), "export finished");
    Ok(rows.len())
}
